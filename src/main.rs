use std::{fs::File, net::IpAddr, sync::Arc, thread, time::Duration};

use crossbeam_channel::{Receiver, Sender, unbounded};
use log::{LevelFilter, debug, error, info};
use mockdmr_rs::{
    enums::messages::MessageType,
    globals::statics::{APP_NAME, APP_VERSION, CONFIG},
    renderer::{identity::RendererIdentity, state::MockRenderer},
    server::control_server::ControlServer,
    ssdp::responder::SsdpResponder,
    utils::{
        commandline::Args,
        local_ip_address::{get_interfaces, get_local_addr},
    },
};
use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, WriteLogger};

fn main() -> Result<(), i32> {
    // gracefully exit on Ctrl-C
    ctrlc::set_handler(move || {
        println!("Received Ctrl+C -> exiting.");
        std::process::exit(0);
    })
    .expect("Error setting Ctrl-C handler");

    // collect command line arguments
    let args = Args::new().parse();

    // initialize config
    let mut config = CONFIG.read().unwrap().clone();
    if let Some(name) = &args.friendly_name {
        config.friendly_name = name.clone();
    }
    if let Some(bind) = &args.bind_address {
        config.bind_address = bind.clone();
    }
    if args.server_port.is_some() {
        config.server_port = args.server_port;
    }
    if let Some(uuid) = &args.device_uuid {
        config.device_uuid = uuid.clone();
    }
    // set args loglevel
    if let Some(level) = args.log_level {
        config.log_level = level;
    }
    if cfg!(debug_assertions) {
        config.log_level = LevelFilter::Debug;
    }

    // configure simplelogger
    let loglevel = config.log_level;
    let logfile = config.log_dir().join("mockdmr.log");
    let _ = CombinedLogger::init(vec![
        TermLogger::new(
            loglevel,
            Config::default(),
            simplelog::TerminalMode::Stderr,
            ColorChoice::Auto,
        ),
        WriteLogger::new(loglevel, Config::default(), File::create(logfile).unwrap()),
    ]);

    info!(
        "{} V {} - Running on {}, {}, {} - Logging started.",
        APP_NAME,
        APP_VERSION,
        std::env::consts::ARCH,
        std::env::consts::FAMILY,
        std::env::consts::OS
    );
    if cfg!(debug_assertions) {
        info!("Running DEBUG build => log level set to DEBUG!");
    }
    info!("Current config: {config:?}");

    // update config with new args
    let _ = config.update_config();
    // update in_memory shared config for other threads
    {
        let mut conf = CONFIG.write().unwrap();
        *conf = config.clone();
    }

    // get the list of available networks
    let networks = get_interfaces();
    for ip in &networks {
        info!("Found network: {ip}");
    }
    // the network address advertised to control points, must be routable
    let local_addr = get_local_addr().expect("Could not obtain local address.");
    info!("using network {local_addr}");
    // the webserver socket binds where the config says, 0.0.0.0 by default
    let bind_addr: IpAddr = config
        .bind_address
        .parse()
        .expect("Invalid bind_address in the configuration");

    let renderer = Arc::new(MockRenderer::new());
    let identity = Arc::new(RendererIdentity::new(
        &config.friendly_name,
        &config.device_uuid,
        &local_addr,
        config.server_port.unwrap_or_default(),
    ));

    // the Crossbeam feedback channel for handled searches and actions
    let (feedback_tx, feedback_rx): (Sender<MessageType>, Receiver<MessageType>) = unbounded();

    // bind the control webserver first, a busy port here is fatal
    let control_server = match ControlServer::bind(
        &bind_addr,
        config.server_port.unwrap_or_default(),
        renderer.clone(),
        &identity,
        feedback_tx.clone(),
    ) {
        Ok(cs) => cs,
        Err(e) => {
            error!("The control webserver could not bind: {e}");
            return Err(-2);
        }
    };

    // exit here if dry-run
    if args.dry_run.is_some() {
        info!("dry-run - exiting...");
        return Ok(());
    }

    // start the SSDP discovery responder unless disabled
    if args.no_ssdp.is_none() {
        match SsdpResponder::bind(identity.clone(), feedback_tx.clone()) {
            Ok(responder) => {
                let _ = thread::Builder::new()
                    .name("ssdp_responder".into())
                    .stack_size(4 * 1024 * 1024)
                    .spawn(move || responder.run())
                    .unwrap();
            }
            Err(e) => error!("SSDP responder not started: {e}"),
        }
    } else {
        info!("SSDP discovery responder disabled (-x)");
    }

    // start the webserver worker threads
    let _ = thread::Builder::new()
        .name("mockdmr_webserver".into())
        .stack_size(4 * 1024 * 1024)
        .spawn(move || control_server.run())
        .unwrap();

    // surface handled requests in the log
    loop {
        while let Ok(msg) = feedback_rx.try_recv() {
            match msg {
                MessageType::ControlMessage(fb) => {
                    debug!(
                        "SOAP {} {} handled for {}",
                        fb.service, fb.action, fb.remote_ip
                    );
                }
                MessageType::SsdpMessage(fb) => {
                    debug!("M-SEARCH {} answered for {}", fb.st, fb.remote_ip);
                }
            }
        }
        thread::sleep(Duration::from_millis(100));
    }
}

use std::net::IpAddr;

use lexopt::{
    Arg::{Long, Short},
    Parser, ValueExt,
};
use log::LevelFilter;

#[derive(Clone, Debug)]
pub struct Args {
    pub dry_run: Option<bool>,
    pub friendly_name: Option<String>,
    pub bind_address: Option<String>,
    pub server_port: Option<u16>,
    pub device_uuid: Option<String>,
    pub log_level: Option<LevelFilter>,
    pub no_ssdp: Option<bool>,
}

impl Default for Args {
    fn default() -> Self {
        Self::new()
    }
}

impl Args {
    #[must_use]
    pub fn new() -> Args {
        Args {
            dry_run: None,
            friendly_name: None,
            bind_address: None,
            server_port: None,
            device_uuid: None,
            log_level: None,
            no_ssdp: None,
        }
    }

    // print usage & bail out
    fn usage(&self) {
        println!(
            r#"
Recognized options:
    -h (--help) : print usage
    -n (--no_run) : dry-run, load config and args, then exit
    -f (--friendly_name) string : device name shown to control points [Mock Renderer]
    -b (--bind_address) string : ip address the webserver binds to [0.0.0.0]
    -p (--server_port) u16 : webserver port [8008]
    -u (--uuid) string : UDN of the mocked device [c0ffee-5eed-0000-1111-222233334444]
    -l (--log_level) string : log_level (info/debug/warn/error) [info]
    -x (--no_ssdp) : only run the webserver, no ssdp discovery responder [false]
"#
        );
        println!("{self:?}");
        std::process::exit(0);
    }

    // parse commandline arguments
    #[must_use]
    pub fn parse(&mut self) -> Args {
        let mut argparser = Parser::from_env();
        while let Some(arg) = argparser.next().unwrap() {
            match arg {
                Short('h') | Long("help") => {
                    self.usage();
                }
                Short('n') | Long("no_run") => {
                    self.dry_run = Some(true);
                }
                Short('f') | Long("friendly_name") => {
                    if let Ok(name) = argparser.value() {
                        self.friendly_name = Some(name.string().unwrap_or_default());
                    }
                }
                Short('b') | Long("bind_address") => {
                    if let Ok(ip) = argparser.value() {
                        let ip = ip.string().unwrap_or_default();
                        if ip.parse::<IpAddr>().is_ok() {
                            self.bind_address = Some(ip);
                        } else {
                            println!("invalid bind address {ip}");
                            self.usage();
                        }
                    }
                }
                Short('p') | Long("server_port") => {
                    if let Ok(port) = argparser.value() {
                        self.server_port = Some(port.parse().unwrap());
                    }
                }
                Short('u') | Long("uuid") => {
                    if let Ok(uuid) = argparser.value() {
                        self.device_uuid = Some(uuid.string().unwrap_or_default());
                    }
                }
                Short('l') | Long("log_level") => {
                    if let Ok(level) = argparser.value() {
                        let loglevel = level.string().unwrap_or_default();
                        match loglevel.to_uppercase().as_str() {
                            "INFO" => self.log_level = Some(LevelFilter::Info),
                            "DEBUG" => self.log_level = Some(LevelFilter::Debug),
                            "WARN" | "WARNING" => self.log_level = Some(LevelFilter::Warn),
                            "ERROR" => self.log_level = Some(LevelFilter::Error),
                            _ => {
                                println!("log_level not info/debug/warn/error");
                                self.usage();
                            }
                        }
                    }
                }
                Short('x') | Long("no_ssdp") => {
                    self.no_ssdp = Some(true);
                }
                _ => (),
            }
        }
        println!("{self:?}\n");
        self.clone()
    }
}

pub mod statics;

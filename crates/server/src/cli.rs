use std::path::PathBuf;

use clap::Parser;
use shared::Variant;

#[derive(Debug, Clone, Parser)]
#[clap(name = "colegiospro server")]
pub struct Cli {
    /// Static files. Must contain manifest.json and the wasm-bindgen output
    /// under wasm/
    #[clap(long, env, default_value = "static")]
    pub assets_dir: PathBuf,
    /// Which deployment the service worker runs as (app or landing)
    #[clap(long, env, default_value = "app")]
    pub variant: Variant,
    #[clap(long, env = "PORT", default_value = "8080")]
    pub port: u16,
    #[clap(long, env, default_value = "0.0.0.0")]
    pub bind_addr: String,
}

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    // Interface to listen on.
    #[arg(long, env = "TODO_HOST", default_value = "0.0.0.0")]
    pub host: String,

    // If the port is not specified, we'll use 3333.
    #[arg(short, long, env = "TODO_PORT", default_value_t = 3333)]
    pub port: u16,

    // Default tracing filter; RUST_LOG takes precedence when set.
    #[arg(long, env = "TODO_LOG", default_value = "info")]
    pub log_level: String,
}

impl Config {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

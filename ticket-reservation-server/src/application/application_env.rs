use anyhow::anyhow;
use std::{net::SocketAddr, path::PathBuf};

pub struct ApplicationEnv {
    pub log_directory: String,
    pub log_filename: String,

    pub bind_address: SocketAddr,

    /// Directory with events.jsonl and tickets.jsonl
    pub data_directory: PathBuf,

    pub max_http_content_len: usize,
    pub max_event_name_len: usize,
}

impl ApplicationEnv {
    pub fn parse() -> anyhow::Result<Self> {
        let log_directory = Self::env_var("TICKET_RESERVATION_SERVER_LOG_DIRECTORY")?;
        let log_filename = Self::env_var("TICKET_RESERVATION_SERVER_LOG_FILENAME")?;
        let bind_address = Self::env_var("TICKET_RESERVATION_SERVER_BIND_ADDRESS")?.parse()?;
        let data_directory = Self::env_var("TICKET_RESERVATION_SERVER_DATA_DIRECTORY")?.into();
        let max_http_content_len =
            Self::env_var("TICKET_RESERVATION_SERVER_MAX_HTTP_CONTENT_LEN")?.parse()?;
        let max_event_name_len =
            Self::env_var("TICKET_RESERVATION_SERVER_MAX_EVENT_NAME_LEN")?.parse()?;

        Ok(Self {
            log_directory,
            log_filename,
            bind_address,
            data_directory,
            max_http_content_len,
            max_event_name_len,
        })
    }

    fn env_var(name: &'static str) -> anyhow::Result<String> {
        std::env::var(name).map_err(|_| anyhow!("environment variable {name} not set"))
    }
}

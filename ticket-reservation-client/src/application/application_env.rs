use anyhow::anyhow;

pub struct ApplicationEnv {
    /// Base url of the reservation server, e.g. `http://127.0.0.1:5050`
    pub server_url: String,
}

impl ApplicationEnv {
    pub fn parse() -> anyhow::Result<Self> {
        let server_url = Self::env_var("TICKET_RESERVATION_CLIENT_SERVER_URL")?
            .trim_end_matches('/')
            .to_string();

        Ok(Self { server_url })
    }

    fn env_var(name: &'static str) -> anyhow::Result<String> {
        std::env::var(name).map_err(|_| anyhow!("environment variable {name} not set"))
    }
}

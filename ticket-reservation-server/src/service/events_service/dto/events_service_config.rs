pub struct EventsServiceConfig {
    pub max_name_len: usize,
}

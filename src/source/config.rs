#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Entry to read from a trip archive. `None` picks the first `.csv` entry.
    pub trips_file_name: Option<String>,
    /// Log and drop unreadable trip rows instead of failing the load.
    pub skip_malformed_rows: bool,
}

#[derive(Debug, Clone, Default)]
pub struct StatsOptions {
    /// Emit a human-readable size next to every raw byte count.
    pub human_readable: bool,
    /// Keep the per-file sizes when collecting and reporting.
    pub include_file_sizes: bool,
}

impl StatsOptions {
    pub fn human_readable(mut self, human_readable: bool) -> Self {
        self.human_readable = human_readable;
        self
    }

    pub fn include_file_sizes(mut self, include_file_sizes: bool) -> Self {
        self.include_file_sizes = include_file_sizes;
        self
    }
}

// rust/karel_cli/src/rollout/sinks.rs
#![forbid(unsafe_code)]

/// One periodic row emitted by the runner.
///
/// Transport struct: runner/stats compute fields, sinks only format/emit.
#[derive(Clone, Debug)]
pub struct ReportRow {
    pub step: u64,
    pub steps_total: u64,

    pub sps: f64,
    pub episodes_finished: u64,

    /// Fraction of `move` attempts that hit a wall.
    pub blocked_rate: f64,
    /// Fraction of picks / puts that actually changed a cell.
    pub pick_hit_rate: f64,
    pub put_hit_rate: f64,

    /// Cells differing between the before/after tensors, averaged over finished episodes.
    pub avg_changed_cells: f64,
    pub max_changed_cells: u64,
}

/// Sink interface for periodic reporting.
pub trait RolloutSink {
    fn on_report_row(&mut self, row: &ReportRow, pb: Option<&indicatif::ProgressBar>);
}

/// Default sink: does nothing.
#[derive(Default)]
pub struct NoopSink;

impl RolloutSink for NoopSink {
    fn on_report_row(&mut self, _row: &ReportRow, _pb: Option<&indicatif::ProgressBar>) {}
}

/// Human-readable periodic table sink.
///
/// Cadence (every N steps) is handled by Runner. This sink prints whenever called.
pub struct TableSink {
    header_every: u64,
    rows_printed: u64,
}

impl TableSink {
    const DEFAULT_HEADER_EVERY: u64 = 20;

    /// If `header_every == 0`, a reasonable default is used.
    pub fn new(header_every: u64) -> Self {
        Self {
            header_every: if header_every == 0 {
                Self::DEFAULT_HEADER_EVERY
            } else {
                header_every
            },
            rows_printed: 0,
        }
    }

    fn header_line(&self) -> String {
        // Keep widths aligned with row_line() below.
        format!(
            "{:>21} {:>10} {:>7} {:>8} {:>8} {:>8} {:>9} {:>8}",
            "step/total", "sps", "eps", "blocked", "pickHit", "putHit", "avgChg", "maxChg",
        )
    }

    fn sep_line(&self) -> String {
        "-".repeat(self.header_line().len())
    }

    fn row_line(&self, r: &ReportRow) -> String {
        format!(
            "{:>10}/{:<10} {:>10.1} {:>7} {:>8.3} {:>8.3} {:>8.3} {:>9.2} {:>8}",
            r.step,
            r.steps_total,
            r.sps,
            r.episodes_finished,
            r.blocked_rate,
            r.pick_hit_rate,
            r.put_hit_rate,
            r.avg_changed_cells,
            r.max_changed_cells,
        )
    }

    fn emit(&self, line: String, pb: Option<&indicatif::ProgressBar>) {
        // Print above the bar so the table does not tear it.
        match pb {
            Some(pb) => pb.println(line),
            None => println!("{line}"),
        }
    }
}

impl RolloutSink for TableSink {
    fn on_report_row(&mut self, row: &ReportRow, pb: Option<&indicatif::ProgressBar>) {
        if self.rows_printed % self.header_every == 0 {
            self.emit(self.header_line(), pb);
            self.emit(self.sep_line(), pb);
        }
        self.emit(self.row_line(row), pb);
        self.rows_printed += 1;
    }
}

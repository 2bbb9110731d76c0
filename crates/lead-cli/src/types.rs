use std::path::PathBuf;

use lead_normalize::NormalizeReport;

#[derive(Debug)]
pub struct ProcessResult {
    pub input: PathBuf,
    /// Where the workbook was written; `None` on a dry run.
    pub output: Option<PathBuf>,
    pub report: NormalizeReport,
}

/*!
 * Reporting functionality for promptfs
 *
 * Prints a summary of a finished run using the tabled library.
 */

use std::time::Duration;

use tabled::{
    settings::{object::Columns, Alignment, Modify, Padding, Style},
    Table, Tabled,
};

use crate::utils::format_file_size;

/// Information about a file in the report
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileReportInfo {
    /// Size in bytes
    pub bytes: u64,
    /// Number of lines in the file
    pub lines: usize,
    /// Number of characters in the file
    pub chars: usize,
}

impl FileReportInfo {
    /// Measure raw file content; invalid UTF-8 is counted lossily
    pub fn from_bytes(content: &[u8]) -> Self {
        let newlines = content.iter().filter(|&&b| b == b'\n').count();
        let lines = if content.is_empty() || content.ends_with(b"\n") {
            newlines
        } else {
            newlines + 1
        };

        Self {
            bytes: content.len() as u64,
            lines,
            chars: String::from_utf8_lossy(content).chars().count(),
        }
    }
}

/// Statistics for a finished run
#[derive(Debug, Clone)]
pub struct ScanReport {
    /// Output file path
    pub output_file: String,
    /// Time taken to scan and write
    pub duration: Duration,
    /// Directories shown in the tree section
    pub directories_listed: usize,
    /// Total size of emitted files
    pub total_bytes: u64,
    /// Details for each emitted file, in output order
    pub file_details: Vec<(String, FileReportInfo)>,
}

impl ScanReport {
    pub fn total_lines(&self) -> usize {
        self.file_details.iter().map(|(_, info)| info.lines).sum()
    }

    pub fn total_chars(&self) -> usize {
        self.file_details.iter().map(|(_, info)| info.chars).sum()
    }
}

/// Report generator for finished runs
pub struct Reporter;

impl Reporter {
    /// Format a number with human-readable units
    fn format_number(num: usize) -> String {
        if num >= 1_000_000 {
            format!("{:.1}M", num as f64 / 1_000_000.0)
        } else if num >= 1_000 {
            format!("{:.1}K", num as f64 / 1_000.0)
        } else {
            num.to_string()
        }
    }

    /// Print the completion message and report to stdout
    pub fn print_report(report: &ScanReport) {
        println!(
            "Project structure and file contents written to {}",
            report.output_file
        );
        println!("\n{}", Self::generate_report(report));
    }

    /// Files table followed by the summary table
    pub fn generate_report(report: &ScanReport) -> String {
        let files_title = if report.file_details.len() > 15 {
            "TOP 10 LARGEST FILES BY CHARACTER COUNT"
        } else {
            "FILES WRITTEN (OLDEST FIRST)"
        };

        format!(
            "{}\n{}\n\n{}\n{}",
            files_title,
            Self::create_files_table(report),
            "SUMMARY",
            Self::create_summary_table(report)
        )
    }

    fn create_summary_table(report: &ScanReport) -> String {
        #[derive(Tabled)]
        struct SummaryRow {
            #[tabled(rename = "Metric")]
            key: &'static str,

            #[tabled(rename = "Value")]
            value: String,
        }

        // Four characters per token
        let estimated_tokens = report.total_chars() / 4;

        let rows = vec![
            SummaryRow {
                key: "Output File",
                value: report.output_file.clone(),
            },
            SummaryRow {
                key: "Process Time",
                value: format!("{:.4?}", report.duration),
            },
            SummaryRow {
                key: "Directories Listed",
                value: Self::format_number(report.directories_listed),
            },
            SummaryRow {
                key: "Files Written",
                value: Self::format_number(report.file_details.len()),
            },
            SummaryRow {
                key: "Total Size",
                value: format_file_size(report.total_bytes),
            },
            SummaryRow {
                key: "Total Lines",
                value: Self::format_number(report.total_lines()),
            },
            SummaryRow {
                key: "LLM Tokens",
                value: format!("{} tokens (estimated)", Self::format_number(estimated_tokens)),
            },
        ];

        let mut table = Table::new(rows);
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));

        table.to_string()
    }

    fn create_files_table(report: &ScanReport) -> String {
        #[derive(Tabled)]
        struct FileRow {
            #[tabled(rename = "File Path")]
            path: String,

            #[tabled(rename = "Lines")]
            lines: String,

            #[tabled(rename = "Est. Tokens")]
            tokens: String,
        }

        let mut files: Vec<&(String, FileReportInfo)> = report.file_details.iter().collect();
        if files.len() > 15 {
            files.sort_by(|(_, a), (_, b)| b.chars.cmp(&a.chars));
            files.truncate(10);
        }

        let rows: Vec<FileRow> = files
            .into_iter()
            .map(|(path, info)| FileRow {
                path: path.clone(),
                lines: Self::format_number(info.lines),
                tokens: Self::format_number(info.chars / 4),
            })
            .collect();

        let mut table = Table::new(rows);
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));

        table.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_lines_with_and_without_trailing_newline() {
        assert_eq!(FileReportInfo::from_bytes(b"").lines, 0);
        assert_eq!(FileReportInfo::from_bytes(b"a\nb\n").lines, 2);
        assert_eq!(FileReportInfo::from_bytes(b"a\nb").lines, 2);
        assert_eq!(FileReportInfo::from_bytes("héllo".as_bytes()).chars, 5);
    }

    #[test]
    fn report_lists_files_and_totals() {
        let report = ScanReport {
            output_file: "prompt_script.txt".to_string(),
            duration: Duration::from_millis(5),
            directories_listed: 2,
            total_bytes: 16,
            file_details: vec![
                ("src/b.py".to_string(), FileReportInfo::from_bytes(b"print(1)\n")),
                ("src/a.py".to_string(), FileReportInfo::from_bytes(b"x = 1\n")),
            ],
        };

        let text = Reporter::generate_report(&report);
        assert!(text.contains("src/b.py"));
        assert!(text.contains("src/a.py"));
        assert!(text.contains("Files Written"));
        assert_eq!(report.total_lines(), 2);
    }
}

//! 报告的纯文本展示
//!
//! 表格、水平条形图和扫描表。失败的算法显示为 `n/a`，不会画成零长度的条。

use std::fmt::Write as _;

use crate::bench::{AlgorithmResult, BenchmarkReport, SweepParameter, SweepPoint};

/// 条形图默认宽度（字符）
pub const DEFAULT_BAR_WIDTH: usize = 40;

const BAR_CHAR: char = '#';

/// 渲染结果表
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use hashbench::bench::{AlgorithmResult, BenchmarkReport};
/// use hashbench::render::render_table;
///
/// let mut report = BenchmarkReport::new();
/// let elapsed = Duration::from_millis(250);
/// report.push(AlgorithmResult::completed("bcrypt", elapsed));
///
/// let table = render_table(&report);
/// assert!(table.contains("bcrypt"));
/// assert!(table.contains("0.250000"));
/// ```
pub fn render_table(report: &BenchmarkReport) -> String {
    let name_width = name_width(report.results().iter().map(|r| r.algorithm.as_str()));
    let mut out = String::new();
    let _ = writeln!(out, "{:<name_width$}  {:>12}  Status", "Algorithm", "Time (s)");
    for result in report.results() {
        let _ = writeln!(
            out,
            "{:<name_width$}  {:>12}  {}",
            result.algorithm,
            format_seconds(result),
            status(result)
        );
    }
    out
}

/// 渲染水平条形图，条长按最慢的成功结果缩放到 `width`
pub fn render_bar_chart(report: &BenchmarkReport, width: usize) -> String {
    let name_width = name_width(report.results().iter().map(|r| r.algorithm.as_str()));
    let max = report
        .slowest()
        .and_then(AlgorithmResult::elapsed_seconds)
        .unwrap_or(0.0);

    let mut out = String::new();
    for result in report.results() {
        let _ = match result.elapsed_seconds() {
            Some(secs) => writeln!(
                out,
                "{:<name_width$} | {:<width$} {:.4}s",
                result.algorithm,
                bar(secs, max, width),
                secs
            ),
            None => writeln!(out, "{:<name_width$} | n/a (failed)", result.algorithm),
        };
    }
    out
}

/// 渲染扫描结果
pub fn render_sweep(parameter: SweepParameter, points: &[SweepPoint]) -> String {
    let label = parameter.as_str();
    let value_width = points
        .iter()
        .map(|p| p.value.to_string().len())
        .fold(label.len(), usize::max);
    let max = points
        .iter()
        .filter_map(|p| p.result.elapsed_seconds())
        .fold(0.0_f64, f64::max);

    let mut out = String::new();
    let algorithm = points
        .first()
        .map(|p| p.result.algorithm.as_str())
        .unwrap_or_else(|| parameter.algorithm().as_str());
    let _ = writeln!(out, "{} sweep over {}", algorithm, label);
    let _ = writeln!(out, "{:>value_width$}  {:>12}", label, "Time (s)");
    for point in points {
        let _ = match point.result.elapsed_seconds() {
            Some(secs) => writeln!(
                out,
                "{:>value_width$}  {:>12.6}  {}",
                point.value,
                secs,
                bar(secs, max, DEFAULT_BAR_WIDTH / 2)
            ),
            None => writeln!(
                out,
                "{:>value_width$}  {:>12}  {}",
                point.value,
                "n/a",
                status(&point.result)
            ),
        };
    }
    out
}

fn name_width<'a>(names: impl Iterator<Item = &'a str>) -> usize {
    names.map(str::len).max().unwrap_or(0).max("Algorithm".len())
}

fn format_seconds(result: &AlgorithmResult) -> String {
    result
        .elapsed_seconds()
        .map(|s| format!("{:.6}", s))
        .unwrap_or_else(|| "n/a".to_string())
}

fn status(result: &AlgorithmResult) -> String {
    match result.error_message() {
        None => "ok".to_string(),
        Some(message) => format!("error: {}", message),
    }
}

fn bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 || width == 0 {
        return String::new();
    }
    let len = ((value / max) * width as f64).round() as usize;
    // 非零耗时至少画一格
    let len = if value > 0.0 { len.clamp(1, width) } else { 0 };
    std::iter::repeat_n(BAR_CHAR, len).collect()
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::error::Error;

    fn completed(algorithm: &str, millis: u64) -> AlgorithmResult {
        AlgorithmResult::completed(algorithm, Duration::from_millis(millis))
    }

    fn report_with_failure() -> BenchmarkReport {
        let failure = Error::out_of_range("argon2 parallelism", 0, 1, 8);
        let mut report = BenchmarkReport::new();
        report.push(completed("bcrypt", 200));
        report.push(AlgorithmResult::failed("argon2id", &failure));
        report
    }

    #[test]
    fn test_table_shows_failure_message() {
        let table = render_table(&report_with_failure());
        let lines: Vec<_> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Algorithm"));
        assert!(lines[1].starts_with("bcrypt"));
        assert!(lines[1].ends_with("ok"));
        assert!(lines[2].contains("n/a"));
        assert!(lines[2].contains("error: Parameter error: argon2 parallelism"));
    }

    #[test]
    fn test_bar_chart_scales_to_slowest() {
        let mut report = BenchmarkReport::new();
        report.push(completed("bcrypt", 400));
        report.push(completed("argon2id", 100));

        let chart = render_bar_chart(&report, 20);
        let lines: Vec<_> = chart.lines().collect();
        assert_eq!(lines[0].matches(BAR_CHAR).count(), 20);
        assert_eq!(lines[1].matches(BAR_CHAR).count(), 5);
        assert!(lines[0].ends_with("0.4000s"));
    }

    #[test]
    fn test_bar_chart_failed_entry() {
        let chart = render_bar_chart(&report_with_failure(), 10);
        assert!(chart.contains("n/a (failed)"));
        assert_eq!(chart.lines().next().unwrap().matches(BAR_CHAR).count(), 10);
    }

    #[test]
    fn test_bar_minimum_one_cell() {
        assert_eq!(bar(0.001, 10.0, 10), "#");
        assert_eq!(bar(0.0, 10.0, 10), "");
        assert_eq!(bar(1.0, 0.0, 10), "");
    }

    #[test]
    fn test_render_sweep() {
        let points = vec![
            SweepPoint {
                value: 4,
                result: completed("bcrypt", 1),
            },
            SweepPoint {
                value: 5,
                result: completed("bcrypt", 2),
            },
        ];
        let out = render_sweep(SweepParameter::BcryptCost, &points);
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines[0], "bcrypt sweep over bcrypt-cost");
        assert_eq!(lines.len(), 4);
        assert!(lines[3].contains("0.002000"));
    }
}

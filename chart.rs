use colored::Colorize;
use serde::Serialize;
use unicode_width::UnicodeWidthStr;

use crate::types::{FrequencyTable, RankedList};

const BAR: &str = "█";

// viridis colour map sampled at 0, 0.25, 0.5, 0.75, 1
const VIRIDIS: [(f64, f64, f64); 5] = [
    (68.0, 1.0, 84.0),
    (59.0, 82.0, 139.0),
    (33.0, 145.0, 140.0),
    (94.0, 201.0, 98.0),
    (253.0, 231.0, 37.0),
];

#[derive(Debug, Clone, Copy)]
pub struct ChartStyle {
    /// Columns used by the longest bar
    pub bar_width: usize,
    pub color: bool,
}

/// Horizontal bar chart, one row per word, each bar labelled with its exact count.
pub fn render_chart(ranked: &RankedList, top_n: usize, style: ChartStyle) -> String {
    let mut out = format!("Top-{top_n} most frequent words\n");
    if ranked.is_empty() {
        out.push_str("(nothing to show)\n");
        return out;
    }

    let label_width = ranked
        .iter()
        .map(|r| UnicodeWidthStr::width(r.word.as_str()))
        .max()
        .unwrap_or(0);
    let max_count = ranked.iter().map(|r| r.count).max().unwrap_or(0);

    for (i, row) in ranked.iter().enumerate() {
        let pad = label_width - UnicodeWidthStr::width(row.word.as_str());
        let bar = BAR.repeat(bar_len(row.count, max_count, style.bar_width));
        let bar = if style.color {
            let (r, g, b) = viridis(i as f64 / top_n.max(1) as f64);
            bar.truecolor(r, g, b).to_string()
        } else {
            bar
        };
        out.push_str(&format!(
            "{}{} │{} {}\n",
            " ".repeat(pad),
            row.word,
            bar,
            group_thousands(row.count)
        ));
    }
    out
}

fn bar_len(count: usize, max_count: usize, width: usize) -> usize {
    if count == 0 || max_count == 0 {
        return 0;
    }
    // u128 so a very wide chart cannot overflow the product
    let len = (count as u128 * width as u128 + max_count as u128 / 2) / max_count as u128;
    usize::try_from(len).unwrap_or(width).clamp(1, width.max(1))
}

/// `1234567` -> `1,234,567`
pub fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn viridis(t: f64) -> (u8, u8, u8) {
    let t = t.clamp(0.0, 1.0) * (VIRIDIS.len() - 1) as f64;
    let lo = (t.floor() as usize).min(VIRIDIS.len() - 2);
    let frac = t - lo as f64;
    let (a, b) = (VIRIDIS[lo], VIRIDIS[lo + 1]);
    let mix = |x: f64, y: f64| (x + (y - x) * frac).round() as u8;
    (mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
}

#[derive(Serialize)]
struct Report<'a> {
    source: &'a str,
    total_tokens: usize,
    distinct_tokens: usize,
    top_n: usize,
    words: &'a RankedList,
}

pub fn render_json(
    source: &str,
    table: &FrequencyTable,
    ranked: &RankedList,
    top_n: usize,
) -> serde_json::Result<String> {
    let report = Report {
        source,
        total_tokens: table.total(),
        distinct_tokens: table.len(),
        top_n,
        words: ranked,
    };
    let mut json = serde_json::to_string_pretty(&report)?;
    json.push('\n');
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RankedWord;

    const PLAIN: ChartStyle = ChartStyle {
        bar_width: 10,
        color: false,
    };

    fn ranked(pairs: &[(&str, usize)]) -> RankedList {
        pairs
            .iter()
            .map(|(w, c)| RankedWord {
                word: w.to_string(),
                count: *c,
            })
            .collect()
    }

    #[test]
    fn renders_aligned_rows() {
        let chart = render_chart(&ranked(&[("the", 10), ("a", 5), ("house", 1)]), 3, PLAIN);
        let expected = [
            "Top-3 most frequent words",
            "  the │██████████ 10",
            "    a │█████ 5",
            "house │█ 1",
        ];
        assert_eq!(chart, expected.join("\n") + "\n");
    }

    #[test]
    fn aligns_by_display_width() {
        let chart = render_chart(&ranked(&[("日本", 2), ("abc", 1)]), 2, PLAIN);
        let lines: Vec<&str> = chart.lines().collect();
        assert_eq!(lines[1], "日本 │██████████ 2");
        assert_eq!(lines[2], " abc │█████ 1");
    }

    #[test]
    fn labels_use_thousands_separators() {
        let chart = render_chart(&ranked(&[("x", 1_234_567)]), 1, PLAIN);
        assert!(chart.ends_with(" 1,234,567\n"));
    }

    #[test]
    fn empty_ranking_says_so() {
        assert_eq!(
            render_chart(&Vec::new(), 0, PLAIN),
            "Top-0 most frequent words\n(nothing to show)\n"
        );
    }

    #[test]
    fn small_counts_still_get_a_cell() {
        assert_eq!(bar_len(1, 1000, 50), 1);
        assert_eq!(bar_len(1000, 1000, 50), 50);
        assert_eq!(bar_len(500, 1000, 50), 25);
        assert_eq!(bar_len(0, 1000, 50), 0);
    }

    #[test]
    fn huge_width_does_not_overflow() {
        assert_eq!(bar_len(4, 4, usize::MAX), usize::MAX);
        assert_eq!(bar_len(2, 4, usize::MAX), usize::MAX / 2 + 1);
    }

    #[test]
    fn groups_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(123456), "123,456");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }

    #[test]
    fn viridis_endpoints() {
        assert_eq!(viridis(0.0), (68, 1, 84));
        assert_eq!(viridis(1.0), (253, 231, 37));
        assert_eq!(viridis(0.5), (33, 145, 140));
    }

    #[test]
    fn json_report_fields() {
        let table: FrequencyTable = [("a", 3), ("b", 2), ("c", 1)]
            .into_iter()
            .map(|(w, c)| (w.to_string(), c))
            .collect();
        let words = ranked(&[("a", 3), ("b", 2)]);
        let json = render_json("https://example.com/", &table, &words, 2).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["source"], "https://example.com/");
        assert_eq!(value["total_tokens"], 6);
        assert_eq!(value["distinct_tokens"], 3);
        assert_eq!(value["top_n"], 2);
        assert_eq!(value["words"][0]["word"], "a");
        assert_eq!(value["words"][1]["count"], 2);
    }
}

//! ROOT macro describing a histogram of the numeric counts.
//!
//! The script is consumed by an external plotting tool; nothing here renders
//! anything. Layout of the generated macro:
//!
//! ```text
//! void error_codes() {
//!     TH1F *h = new TH1F("h_error_codes", "...", <distinct codes>, <min - 0.5>, <max + 0.5>);
//!     h->Fill(<code>, <count>);   // one per code
//!     TCanvas *c = new TCanvas(...);
//!     h->Draw();
//!     c->SaveAs("<image file>");
//! }
//! ```

use std::fmt::Write;

use errorgen_core::AggregatedCounts;

/// Naming for the generated macro.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistogramOptions {
    /// Function name; ROOT expects it to match the file stem.
    pub macro_name: String,
    pub histogram_name: String,
    /// ROOT title string (`title;x label;y label`).
    pub title: String,
    pub image_file: String,
}

impl Default for HistogramOptions {
    fn default() -> Self {
        Self {
            macro_name: "error_codes".into(),
            histogram_name: "h_error_codes".into(),
            title: "Error code distribution;Error code;Occurrences".into(),
            image_file: "error_codes.png".into(),
        }
    }
}

impl HistogramOptions {
    /// Options whose macro name and image file follow the script path's stem.
    ///
    /// The macro name is made a valid C++ identifier: non-alphanumerics
    /// become `_`, and a leading digit (or an empty stem) gets a `_` prefix.
    pub fn for_stem(stem: &str) -> Self {
        let mut macro_name: String = stem
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect();
        if !macro_name.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_') {
            macro_name.insert(0, '_');
        }
        Self {
            image_file: format!("{stem}.png"),
            macro_name,
            ..Self::default()
        }
    }
}

/// Generate the histogram macro, or `None` when there are no numeric codes.
///
/// Bin count is the number of distinct numeric codes; the axis spans
/// `[min - 0.5, max + 0.5]`. Non-numeric tokens are not plotted.
pub fn histogram_script(counts: &AggregatedCounts, options: &HistogramOptions) -> Option<String> {
    let (min, max) = counts.code_range()?;
    let bins = counts.numeric.len();
    let low = min as f64 - 0.5;
    let high = max as f64 + 0.5;

    let mut out = String::new();
    let _ = writeln!(out, "void {}() {{", options.macro_name);
    let _ = writeln!(
        out,
        "    TH1F *h = new TH1F(\"{}\", \"{}\", {bins}, {low:.1}, {high:.1});",
        escape(&options.histogram_name),
        escape(&options.title),
    );
    for (code, count) in &counts.numeric {
        let _ = writeln!(out, "    h->Fill({code}, {count});");
    }
    let _ = writeln!(
        out,
        "    TCanvas *c = new TCanvas(\"c_{}\", \"{}\", 800, 600);",
        options.macro_name,
        escape(&options.title),
    );
    out.push_str("    h->Draw();\n");
    let _ = writeln!(out, "    c->SaveAs(\"{}\");", escape(&options.image_file));
    out.push_str("}\n");

    Some(out)
}

fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

//! Rendering the end-of-run summary for stdout.

use safeharbor_zip::Summary;

pub(crate) fn render_text(summary: &Summary) -> String {
    let mut text = format!(
        "Processed {} rows\nDeidentified columns: {}\nPrecision: {}, Fill character: {}\n",
        summary.rows,
        summary.columns.join(", "),
        summary.precision,
        summary.fill,
    );
    if summary.redactions > 0 {
        text.push_str(&format!(
            "Redacted {} values in sparsely populated areas (HIPAA Safe Harbor)\n",
            summary.redactions
        ));
    }
    if let Some(output) = &summary.output {
        text.push_str(&format!("Output saved to: {}\n", output.display()));
    }
    text
}

pub(crate) fn render_json(summary: &Summary) -> String {
    summary.to_json().to_string()
}

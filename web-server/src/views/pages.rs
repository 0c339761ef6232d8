//! Page templates

use base64::{engine::general_purpose::STANDARD, Engine as _};
use urlsentry_core::{BatchReport, ExplainResult, Label, UrlVerdict};

use super::{chart, escape, layout, Banner, BannerKind};

/// Rows shown in the on-page preview; the download has all of them
const PREVIEW_ROWS: usize = 100;

/// Name of the generated download
const DOWNLOAD_NAME: &str = "predictions.csv";

fn url_form(value: &str) -> String {
    format!(
        "<p>Enter a URL below to check if it is <strong>Malicious</strong> or <strong>Benign</strong>.</p>\n\
         <form method=\"post\" action=\"/predict\">\n\
         <label for=\"url\">🔗 Enter URL:</label>\n\
         <input type=\"text\" id=\"url\" name=\"url\" value=\"{}\">\n\
         <button type=\"submit\">Predict</button>\n\
         </form>\n",
        escape(value)
    )
}

fn upload_form() -> &'static str {
    "<h2>📄 Batch prediction</h2>\n\
     <p class=\"muted\">Upload a CSV file with a <code>url</code> column.</p>\n\
     <form method=\"post\" action=\"/batch\" enctype=\"multipart/form-data\">\n\
     <input type=\"file\" name=\"file\" accept=\".csv,text/csv\">\n\
     <button type=\"submit\">Upload</button>\n\
     </form>\n"
}

fn percent(p: f32) -> String {
    format!("{:.2}%", p * 100.0)
}

/// Landing page, optionally with a banner above the forms
pub fn index_page(banner: Option<&Banner>) -> String {
    let mut body = url_form("");
    if let Some(banner) = banner {
        body.push_str(&banner.render());
    }
    body.push_str(upload_form());
    layout(&body)
}

/// Single URL result
pub fn prediction_page(verdict: &UrlVerdict, explained: &ExplainResult, show_confidence: bool) -> String {
    let prediction = &verdict.prediction;
    let mut body = url_form(&verdict.url);

    let banner = match prediction.label {
        Label::Malicious => Banner::new(
            BannerKind::Error,
            "⚠️ Warning: This URL is <strong>Malicious</strong>.",
        ),
        Label::Benign => Banner::new(
            BannerKind::Success,
            "✅ This URL is <strong>Benign</strong> and Safe.",
        ),
    };
    body.push_str(&banner.render());

    if show_confidence {
        body.push_str(&format!(
            "<p>Confidence: <strong>{}</strong> <span class=\"muted\">(P(malicious) = {:.4})</span></p>\n",
            percent(prediction.confidence),
            prediction.malicious_probability
        ));
    }

    body.push_str("<h2>Extracted features</h2>\n<table>\n<thead><tr><th>Feature</th><th>Value</th>");
    if explained.has_importances {
        body.push_str("<th>Importance</th>");
    }
    body.push_str("<th>Description</th></tr></thead>\n<tbody>\n");

    for c in &explained.contributions {
        body.push_str(&format!("<tr><td><code>{}</code></td><td>{}</td>", escape(&c.name), c.value));
        if explained.has_importances {
            let importance = c.importance.map(|i| format!("{:.4}", i)).unwrap_or_default();
            body.push_str(&format!("<td>{}</td>", importance));
        }
        body.push_str(&format!("<td>{}</td></tr>\n", escape(&c.description)));
    }
    body.push_str("</tbody>\n</table>\n");

    body.push_str(upload_form());
    layout(&body)
}

/// Everything the batch page needs
pub struct BatchView<'a> {
    pub report: &'a BatchReport,
    pub filename: Option<&'a str>,
    /// Exported CSV, embedded as the download link
    pub csv: &'a [u8],
    pub show_confidence: bool,
}

/// Batch results: preview table, distribution chart, download link
pub fn batch_page(view: &BatchView<'_>) -> String {
    let report = view.report;
    let mut body = url_form("");

    let name = view.filename.map(escape).unwrap_or_else(|| "CSV".to_string());
    body.push_str(
        &Banner::new(
            BannerKind::Success,
            format!("File <strong>{}</strong> processed: {} rows.", name, report.len()),
        )
        .render(),
    );

    // Preview table
    body.push_str("<h2>Results</h2>\n<table>\n<thead><tr>");
    for header in &report.headers {
        body.push_str(&format!("<th>{}</th>", escape(header)));
    }
    body.push_str("<th>Prediction</th>");
    if view.show_confidence {
        body.push_str("<th>Confidence</th>");
    }
    body.push_str("</tr></thead>\n<tbody>\n");

    for record in report.records.iter().take(PREVIEW_ROWS) {
        body.push_str("<tr>");
        for cell in &record.cells {
            body.push_str(&format!("<td>{}</td>", escape(cell)));
        }
        body.push_str(&format!(
            "<td style=\"color:{}\">{}</td>",
            record.label.color(),
            record.label
        ));
        if view.show_confidence {
            body.push_str(&format!("<td>{}</td>", percent(record.confidence)));
        }
        body.push_str("</tr>\n");
    }
    body.push_str("</tbody>\n</table>\n");

    if report.len() > PREVIEW_ROWS {
        body.push_str(&format!(
            "<p class=\"muted\">Showing the first {} of {} rows.</p>\n",
            PREVIEW_ROWS,
            report.len()
        ));
    }

    body.push_str("<h2>Prediction distribution</h2>\n");
    body.push_str(&chart::distribution_svg(&report.distribution));

    body.push_str(&format!(
        "<p><a download=\"{}\" href=\"data:text/csv;base64,{}\">📥 Download predictions</a></p>\n",
        DOWNLOAD_NAME,
        STANDARD.encode(view.csv)
    ));

    body.push_str(upload_form());
    layout(&body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use urlsentry_core::{BatchRecord, FeatureExtractor, Prediction, ThresholdConfig};

    fn verdict(url: &str, probs: [f64; 2]) -> UrlVerdict {
        UrlVerdict {
            url: url.to_string(),
            features: FeatureExtractor::default().extract(url),
            prediction: Prediction::from_probabilities(probs, &ThresholdConfig::default()),
        }
    }

    fn explained(verdict: &UrlVerdict) -> ExplainResult {
        urlsentry_core::logic::explain::explain(&verdict.features, None)
    }

    #[test]
    fn test_index_has_both_forms() {
        let html = index_page(None);
        assert!(html.contains("action=\"/predict\""));
        assert!(html.contains("action=\"/batch\""));
        assert!(html.contains("multipart/form-data"));
    }

    #[test]
    fn test_malicious_banner() {
        let v = verdict("http://10.0.0.1/<x>", [0.1, 0.9]);
        let html = prediction_page(&v, &explained(&v), true);

        assert!(html.contains("banner error"));
        assert!(html.contains("<strong>Malicious</strong>."));
        assert!(html.contains("90.00%"));
        assert!(html.contains("value=\"http://10.0.0.1/&lt;x&gt;\""));
        assert!(html.contains("<code>use_of_ip</code>"));
    }

    #[test]
    fn test_confidence_can_be_hidden() {
        let v = verdict("http://example.com", [0.8, 0.2]);
        let html = prediction_page(&v, &explained(&v), false);

        assert!(html.contains("<strong>Benign</strong> and Safe."));
        assert!(!html.contains("Confidence:"));
    }

    #[test]
    fn test_batch_page_embeds_download() {
        let prediction = Prediction::from_probabilities([0.35, 0.65], &ThresholdConfig::default());
        let report = BatchReport::new(
            vec!["url".to_string()],
            vec![BatchRecord::new(0, "http://10.0.0.1/".to_string(), prediction, vec!["http://10.0.0.1/".to_string()])],
        );
        let csv = b"url,Prediction,Confidence\n";
        let html = batch_page(&BatchView {
            report: &report,
            filename: Some("urls.csv"),
            csv,
            show_confidence: true,
        });

        assert!(html.contains("<strong>urls.csv</strong> processed: 1 rows."));
        assert!(html.contains(&format!("data:text/csv;base64,{}", STANDARD.encode(csv))));
        assert!(html.contains("download=\"predictions.csv\""));
        assert!(html.contains("<svg"));
        assert!(html.contains("65.00%"));
    }
}

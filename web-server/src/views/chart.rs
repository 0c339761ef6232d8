//! Label distribution bar chart (inline SVG)

use urlsentry_core::{Label, LabelDistribution};

const WIDTH: u32 = 420;
const BAR_HEIGHT: u32 = 28;
const LABEL_WIDTH: u32 = 90;
const GAP: u32 = 12;

/// Horizontal bars, one per label, scaled to the largest count
pub fn distribution_svg(distribution: &LabelDistribution) -> String {
    let labels = [Label::Benign, Label::Malicious];
    let max = labels
        .iter()
        .map(|l| distribution.count(*l))
        .max()
        .unwrap_or(0)
        .max(1);
    let track = WIDTH - LABEL_WIDTH - 70;
    let height = labels.len() as u32 * (BAR_HEIGHT + GAP) + GAP;

    let mut svg = format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" \
         viewBox=\"0 0 {w} {h}\" role=\"img\" aria-label=\"Prediction distribution\">\n",
        w = WIDTH,
        h = height
    );

    for (i, label) in labels.iter().enumerate() {
        let count = distribution.count(*label);
        let y = GAP + i as u32 * (BAR_HEIGHT + GAP);
        let bar = (count as u64 * track as u64 / max as u64) as u32;

        svg.push_str(&format!(
            "  <text x=\"0\" y=\"{ty}\" font-size=\"14\">{name}</text>\n\
             \x20 <rect x=\"{x}\" y=\"{y}\" width=\"{bar}\" height=\"{bh}\" fill=\"{color}\"/>\n\
             \x20 <text x=\"{cx}\" y=\"{ty}\" font-size=\"13\">{count} ({pct:.1}%)</text>\n",
            ty = y + BAR_HEIGHT / 2 + 5,
            name = label.as_str(),
            x = LABEL_WIDTH,
            y = y,
            bar = bar,
            bh = BAR_HEIGHT,
            color = label.color(),
            cx = LABEL_WIDTH + bar + 6,
            count = count,
            pct = distribution.percent(*label),
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

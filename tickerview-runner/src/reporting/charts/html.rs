//! Standalone HTML page around a rendered plot.
//!
//! The page inlines the SVG, the hover data as JSON and a small script that
//! draws a vertical crosshair and a tooltip. Nothing is loaded from the
//! network.

use serde::Serialize;

use super::plot::PlotArea;
use super::RenderError;
use crate::reporting::format::escape_html;

/// How the tooltip picks its point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HoverMode {
    /// Nearest point by x only.
    Vline,
    /// Nearest point by distance to the cursor.
    Mouse,
}

/// A data point's pixel position and its tooltip rows (label, value).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HoverPoint {
    pub x: i32,
    pub y: i32,
    pub rows: Vec<(String, String)>,
}

#[derive(Serialize)]
struct HoverData<'a> {
    mode: HoverMode,
    area: PlotArea,
    points: &'a [HoverPoint],
}

const STYLE: &str = r#"
body { margin: 0; font-family: sans-serif; }
#chart { position: relative; display: inline-block; }
#crosshair { position: absolute; width: 1px; background: #888; pointer-events: none; display: none; }
#tooltip { position: absolute; pointer-events: none; display: none; background: #fff;
  border: 1px solid #bbb; border-radius: 3px; padding: 4px 6px; font-size: 11px; white-space: nowrap;
  box-shadow: 0 1px 3px rgba(0, 0, 0, 0.2); }
#tooltip .label { color: #555; }
"#;

const SCRIPT: &str = r#"
(function () {
  var data = JSON.parse(document.getElementById("hover-data").textContent);
  var chart = document.getElementById("chart");
  var tip = document.getElementById("tooltip");
  var hair = document.getElementById("crosshair");
  var area = data.area;
  hair.style.top = area.top + "px";
  hair.style.height = (area.bottom - area.top) + "px";

  function hide() {
    tip.style.display = "none";
    hair.style.display = "none";
  }

  function nearest(mx, my) {
    var best = null;
    var bestDistance = Infinity;
    data.points.forEach(function (p) {
      var dx = p.x - mx;
      var dy = p.y - my;
      var distance = data.mode === "vline" ? Math.abs(dx) : dx * dx + dy * dy;
      if (distance < bestDistance) {
        bestDistance = distance;
        best = p;
      }
    });
    return best;
  }

  chart.addEventListener("mousemove", function (event) {
    var rect = chart.getBoundingClientRect();
    var mx = event.clientX - rect.left;
    var my = event.clientY - rect.top;
    if (mx < area.left || mx > area.right || my < area.top || my > area.bottom) {
      hide();
      return;
    }
    hair.style.left = mx + "px";
    hair.style.display = "block";

    var p = nearest(mx, my);
    if (!p) {
      tip.style.display = "none";
      return;
    }
    tip.textContent = "";
    p.rows.forEach(function (row) {
      var line = document.createElement("div");
      var label = document.createElement("span");
      label.className = "label";
      label.textContent = row[0] + ": ";
      var value = document.createElement("span");
      value.textContent = row[1];
      line.appendChild(label);
      line.appendChild(value);
      tip.appendChild(line);
    });
    tip.style.display = "block";
    var left = Math.min(p.x + 10, chart.clientWidth - tip.offsetWidth - 2);
    var top = Math.max(p.y - tip.offsetHeight - 10, 0);
    tip.style.left = Math.max(left, 0) + "px";
    tip.style.top = top + "px";
  });
  chart.addEventListener("mouseleave", hide);
})();
"#;

/// Build the complete HTML document.
pub fn page(
    title: &str,
    svg: &str,
    mode: HoverMode,
    area: PlotArea,
    points: &[HoverPoint],
) -> Result<String, RenderError> {
    let data = serde_json::to_string(&HoverData { mode, area, points })?;
    // Keep the JSON from closing its <script> element early.
    let data = data.replace("</", "<\\/");

    let mut html = String::with_capacity(svg.len() + data.len() + 4096);
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>");
    html.push_str(&escape_html(title));
    html.push_str("</title>\n<style>");
    html.push_str(STYLE);
    html.push_str("</style>\n</head>\n<body>\n<div id=\"chart\">\n");
    html.push_str(svg);
    html.push_str("\n<div id=\"crosshair\"></div>\n<div id=\"tooltip\"></div>\n</div>\n");
    html.push_str("<script type=\"application/json\" id=\"hover-data\">");
    html.push_str(&data);
    html.push_str("</script>\n<script>");
    html.push_str(SCRIPT);
    html.push_str("</script>\n</body>\n</html>\n");
    Ok(html)
}

use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::Path;

use log::debug;

use crate::pairings::PairingKey;

pub const CHORD_WIDTH: u32 = 1600;
pub const CHORD_MARGIN: u32 = 200;
pub const CHORD_PADDING: f64 = 0.02;
pub const CHORD_FONT_SIZE: &str = "12px";
pub const CHORD_NOUN: &str = "FanFics";

/// A symmetric adjacency matrix over the sorted set of names occurring in
/// the surviving pairings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChordMatrix {
    pub names: Vec<String>,
    pub matrix: Vec<Vec<i64>>,
}

/// Purge entries whose value is not positive, then lay the survivors out
/// as a symmetric matrix.
///
/// Names only enter the matrix through a surviving pairing; a name whose
/// every pairing was purged disappears with them.
pub fn build_matrix(mut values: HashMap<PairingKey, i64>) -> ChordMatrix {
    values.retain(|_, v| *v > 0);

    let names: Vec<String> = values
        .keys()
        .flat_map(|(a, b)| [a.clone(), b.clone()])
        .collect::<BTreeSet<String>>()
        .into_iter()
        .collect();
    let index: HashMap<&str, usize> = names
        .iter()
        .enumerate()
        .map(|(i, name)| (name.as_str(), i))
        .collect();

    let mut matrix = vec![vec![0_i64; names.len()]; names.len()];
    for ((a, b), value) in &values {
        let (i, j) = (index[a.as_str()], index[b.as_str()]);
        matrix[i][j] = *value;
        matrix[j][i] = *value;
    }
    debug!("built {0}x{0} chord matrix", names.len());
    ChordMatrix { names, matrix }
}

/// Write the chord diagram as a self-contained HTML document.
///
/// The drawing itself is delegated to d3-chord in the browser; this side
/// only injects the matrix, the name list, and the fixed presentation
/// parameters into the page.
pub fn write_chord_html(chord: &ChordMatrix, outfile: &Path) -> Result<(), String> {
    if chord.names.is_empty() {
        return Err("No pairings left after purging, nothing to draw".to_string());
    }
    let names = serde_json::to_string(&chord.names)
        .map_err(|e| format!("Serialize names failed: {e}"))?;
    let matrix = serde_json::to_string(&chord.matrix)
        .map_err(|e| format!("Serialize matrix failed: {e}"))?;
    let page = TEMPLATE
        .replace("__NAMES__", &names)
        .replace("__MATRIX__", &matrix)
        .replace("__WIDTH__", &CHORD_WIDTH.to_string())
        .replace("__MARGIN__", &CHORD_MARGIN.to_string())
        .replace("__PADDING__", &CHORD_PADDING.to_string())
        .replace("__FONT_SIZE__", CHORD_FONT_SIZE)
        .replace("__NOUN__", CHORD_NOUN);
    fs::write(outfile, page).map_err(|e| format!("Write {} failed: {e}", outfile.display()))
}

const TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Pairing chord diagram</title>
<script src="https://cdn.jsdelivr.net/npm/d3@7"></script>
<style>
  body { font-family: sans-serif; margin: 0; }
  text { font-size: __FONT_SIZE__; white-space: nowrap; }
</style>
</head>
<body>
<div id="chart"></div>
<script>
var names = __NAMES__;
var matrix = __MATRIX__;
var width = __WIDTH__;
var margin = __MARGIN__;
var outerRadius = width / 2 - margin;
var innerRadius = outerRadius - 20;

var chord = d3.chord().padAngle(__PADDING__).sortSubgroups(d3.descending);
var arc = d3.arc().innerRadius(innerRadius).outerRadius(outerRadius);
var ribbon = d3.ribbon().radius(innerRadius);
var color = d3.scaleOrdinal(
  names,
  d3.quantize(d3.interpolateRainbow, Math.max(names.length, 2))
);

var svg = d3.select("#chart")
  .append("svg")
  .attr("width", width)
  .attr("height", width)
  .append("g")
  .attr("transform", "translate(" + width / 2 + "," + width / 2 + ")");

var chords = chord(matrix);

var group = svg.append("g")
  .selectAll("g")
  .data(chords.groups)
  .join("g");

group.append("path")
  .attr("fill", function (d) { return color(names[d.index]); })
  .attr("stroke", "#000")
  .attr("d", arc);

group.append("text")
  .each(function (d) { d.angle = (d.startAngle + d.endAngle) / 2; })
  .attr("dy", "0.35em")
  .attr("transform", function (d) {
    return "rotate(" + (d.angle * 180 / Math.PI - 90) + ")"
      + "translate(" + (outerRadius + 6) + ")"
      + (d.angle > Math.PI ? "rotate(180)" : "");
  })
  .attr("text-anchor", function (d) { return d.angle > Math.PI ? "end" : null; })
  .text(function (d) { return names[d.index]; });

svg.append("g")
  .attr("fill-opacity", 0.67)
  .selectAll("path")
  .data(chords)
  .join("path")
  .attr("d", ribbon)
  .attr("fill", function (d) { return color(names[d.target.index]); })
  .attr("stroke", "#000")
  .append("title")
  .text(function (d) {
    return names[d.source.index] + " / " + names[d.target.index]
      + ": " + d.source.value + " __NOUN__";
  });
</script>
</body>
</html>
"##;

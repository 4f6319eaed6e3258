//! Hover tooltip overlay.
//!
//! The tooltip is a hidden group at the end of the document. An inline script
//! wires pointer enter/leave on counties and legend swatches: counties show
//! their name and percentage, swatches show their raw color string.

use crate::render::svg::{Element, SvgWriter};

/// Tooltip offset `[dy, dx]` from the pointer, in user units.
pub const TOOLTIP_OFFSET: [i32; 2] = [-10, 0];

const SCRIPT_BODY: &str = r##"(function () {
  var svg = document.getElementById("chloropleth-map");
  var tip = document.getElementById("tooltip");
  if (!svg || !tip) { return; }
  var bg = tip.querySelector("rect");
  var nameLine = tip.querySelector(".tooltip-name");
  var valueLine = tip.querySelector(".tooltip-value");
  var PAD = 8;

  function pointer(evt) {
    var pt = svg.createSVGPoint();
    pt.x = evt.clientX;
    pt.y = evt.clientY;
    var ctm = svg.getScreenCTM();
    return ctm ? pt.matrixTransform(ctm.inverse()) : pt;
  }

  function show(evt, name, value) {
    nameLine.textContent = name;
    valueLine.textContent = value;
    tip.setAttribute("visibility", "visible");
    var box = tip.querySelector("text").getBBox();
    bg.setAttribute("width", box.width + PAD * 2);
    bg.setAttribute("height", box.height + PAD * 2);
    var p = pointer(evt);
    var x = p.x + OFFSET[1] - (box.width + PAD * 2) / 2;
    var y = p.y + OFFSET[0] - (box.height + PAD * 2);
    tip.setAttribute("transform", "translate(" + x + "," + y + ")");
  }

  function hide() {
    tip.setAttribute("visibility", "hidden");
  }

  var counties = svg.querySelectorAll(".county");
  for (var i = 0; i < counties.length; i++) {
    (function (el) {
      el.addEventListener("mouseover", function (evt) {
        var pct = el.getAttribute("data-education");
        tip.setAttribute("data-education", pct || "");
        if (pct === null) {
          show(evt, "No data", el.getAttribute("data-fips") || "");
        } else {
          show(evt, el.getAttribute("data-name") || "", pct + "%");
        }
      });
      el.addEventListener("mouseout", hide);
    })(counties[i]);
  }

  var swatches = svg.querySelectorAll("#legend rect");
  for (var j = 0; j < swatches.length; j++) {
    (function (el) {
      el.addEventListener("mouseover", function (evt) {
        show(evt, el.getAttribute("data-color") || "", "");
      });
      el.addEventListener("mouseout", hide);
    })(swatches[j]);
  }
})();
"##;

/// Hidden tooltip group; the script fills and positions it.
pub fn write_tooltip(w: &mut SvgWriter) {
    w.open(
        Element::new("g")
            .attr("id", "tooltip")
            .attr("class", "card py-2 px-4")
            .attr("visibility", "hidden")
            .attr("pointer-events", "none")
            .attr("data-education", ""),
    );
    w.leaf(
        Element::new("rect")
            .attr("rx", 4)
            .attr("fill", "#ffffff")
            .attr("stroke", "#333333")
            .attr("fill-opacity", "0.95"),
    );
    w.open(
        Element::new("text")
            .attr("font-family", "sans-serif")
            .attr("font-size", 12)
            .attr("fill", "#222222"),
    );
    w.text(Element::new("tspan").attr("class", "tooltip-name").attr("x", 8).attr("y", 20), "");
    w.text(Element::new("tspan").attr("class", "tooltip-value").attr("x", 8).attr("dy", "1.2em"), "");
    w.close();
    w.close();
}

pub fn write_script(w: &mut SvgWriter) {
    let body = format!(
        "var OFFSET = [{}, {}];\n{}",
        TOOLTIP_OFFSET[0], TOOLTIP_OFFSET[1], SCRIPT_BODY
    );
    w.cdata(Element::new("script").attr("type", "application/ecmascript"), &body);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tooltip_starts_hidden_with_empty_percentage() {
        let mut w = SvgWriter::new();
        write_tooltip(&mut w);
        write_script(&mut w);
        let out = w.finish();
        assert!(out.contains("id=\"tooltip\" class=\"card py-2 px-4\" visibility=\"hidden\""));
        assert!(out.contains("data-education=\"\""));
        assert!(out.contains("var OFFSET = [-10, 0];"));
        assert!(out.contains("<![CDATA["));
    }
}

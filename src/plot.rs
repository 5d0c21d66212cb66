use plotters::coord::ranged1d::{DefaultFormatting, KeyPointHint};
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;
use serde::{Deserialize, Serialize};

use std::fs::read;
use std::ops::Range;
use std::path::Path;

use crate::common::time_point::TimePoint;
use crate::common::time_series::TimeSeries;
use crate::{PlotErr, Result};

pub const INPUT_COLOUR: RGBColor = RGBColor(0x00, 0x00, 0xFF);
pub const OUTPUT_COLOUR: RGBColor = RGBColor(0x00, 0x80, 0x00);

const MARKER_SIZE: u32 = 3;
const TITLE_FONT_SIZE: f64 = 14.0;
// fraction of the axis span left empty on each side
const AXIS_PADDING: f64 = 0.05;

/// Labels, ticks and canvas size of the chart.
///
/// Every field may be left out of the yaml file, the missing ones keep their default.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ChartStyle {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub x_ticks: Vec<f64>,
    pub y_ticks: Vec<f64>,
    pub width: u32,
    pub height: u32,
}

impl ChartStyle {
    pub fn from_file(filepath: &Path) -> Result<ChartStyle> {
        let content = read(filepath).map_err(|e| PlotErr::FileIoErr(filepath.to_path_buf(), e))?;
        let style: ChartStyle = serde_yaml::from_slice(content.as_slice())?;
        style.validate()?;
        Ok(style)
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(PlotErr::ConfigErr(format!(
                "canvas must not be empty, got {}x{}",
                self.width, self.height
            )));
        }
        if self.x_ticks.iter().chain(self.y_ticks.iter()).any(|t| !t.is_finite()) {
            return Err(PlotErr::ConfigErr("ticks must be finite numbers".to_string()));
        }
        Ok(())
    }
}

impl Default for ChartStyle {
    fn default() -> Self {
        ChartStyle {
            title: "No of KiloBytes vs Time(Input- Blue, Output- Green)".to_string(),
            x_label: "Time".to_string(),
            y_label: "Number of KiloBytes per second".to_string(),
            x_ticks: (1..=7).map(|x| (x * 100) as f64).collect(),
            y_ticks: (1..=11).map(|y| (y * 50) as f64).collect(),
            width: 800,
            height: 600,
        }
    }
}

/// Draw `input` and `output` as scatter points on shared axes and save the chart to `path`.
///
/// A `.svg` path is written as svg, any other path goes through the bitmap backend,
/// which picks the image format from the extension.
pub fn render(input: &TimeSeries, output: &TimeSeries, path: &Path, style: &ChartStyle) -> Result<()> {
    style.validate()?;
    let size = (style.width, style.height);
    let is_svg = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| ext.eq_ignore_ascii_case("svg"));

    if is_svg {
        draw(SVGBackend::new(path, size).into_drawing_area(), input, output, style)?;
    } else {
        draw(BitMapBackend::new(path, size).into_drawing_area(), input, output, style)?;
    }
    info!("chart saved to {:?}", path);
    Ok(())
}

fn draw<DB: DrawingBackend>(
    root: DrawingArea<DB, Shift>,
    input: &TimeSeries,
    output: &TimeSeries,
    style: &ChartStyle,
) -> Result<()> {
    root.fill(&WHITE).map_err(render_err)?;

    let points: Vec<&TimePoint> = input.time_points().iter().chain(output.time_points().iter()).collect();
    let x_range = axis_range(points.iter().map(|tp| tp.timestamp), &style.x_ticks);
    let y_range = axis_range(points.iter().map(|tp| tp.value), &style.y_ticks);

    let mut chart = ChartBuilder::on(&root)
        .caption(
            &style.title,
            ("sans-serif", TITLE_FONT_SIZE).into_font().style(FontStyle::Bold),
        )
        .margin(20)
        .set_label_area_size(LabelAreaPosition::Left, 60)
        .set_label_area_size(LabelAreaPosition::Bottom, 40)
        .build_cartesian_2d(
            FixedTicks::new(x_range, &style.x_ticks),
            FixedTicks::new(y_range, &style.y_ticks),
        )
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .x_labels(style.x_ticks.len())
        .y_labels(style.y_ticks.len())
        .x_label_formatter(&|x| format!("{}", x))
        .y_label_formatter(&|y| format!("{}", y))
        .x_desc(style.x_label.as_str())
        .y_desc(style.y_label.as_str())
        .draw()
        .map_err(render_err)?;

    for (series, colour) in [(input, INPUT_COLOUR), (output, OUTPUT_COLOUR)].iter() {
        let colour = *colour;
        chart
            .draw_series(
                drawable_points(series)
                    .map(move |tp| Circle::new((tp.timestamp, tp.value), MARKER_SIZE, colour.filled())),
            )
            .map_err(render_err)?
            .label(series.name())
            .legend(move |(x, y)| Circle::new((x, y), MARKER_SIZE, colour.filled()));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.filled())
        .border_style(&BLACK)
        .draw()
        .map_err(render_err)?;

    root.present().map_err(render_err)?;
    Ok(())
}

fn drawable_points<'a>(series: &'a TimeSeries) -> impl Iterator<Item = &'a TimePoint> + 'a {
    let dropped = series.time_points().iter().filter(|tp| !tp.is_finite()).count();
    if dropped > 0 {
        warn!("{} non-finite points of {} are not drawn", dropped, series.name());
    }
    series.time_points().iter().filter(|tp| tp.is_finite())
}

/// Axis range covering every finite data value and every tick, padded on both sides.
///
/// The padding is taken from each bound separately and the result clamped, so data
/// spanning most of the f64 range still gives a finite axis.
pub fn axis_range<I: Iterator<Item = f64>>(data: I, ticks: &[f64]) -> Range<f64> {
    let bounds = data
        .chain(ticks.iter().cloned())
        .filter(|v| v.is_finite())
        .fold(None, |acc: Option<(f64, f64)>, v| match acc {
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            None => Some((v, v)),
        });

    let (lo, hi) = match bounds {
        Some((lo, hi)) if hi > lo => (lo, hi),
        Some((v, _)) => (v - 0.5, v + 0.5),
        None => (0.0, 1.0),
    };
    let pad = hi * AXIS_PADDING - lo * AXIS_PADDING;
    (lo - pad).max(std::f64::MIN)..(hi + pad).min(std::f64::MAX)
}

///
/// Linear f64 axis whose tick marks are a fixed list instead of generated ones.
///
/// Ticks outside the axis range are left out, no light mesh lines are drawn.
pub struct FixedTicks {
    inner: RangedCoordf64,
    ticks: Vec<f64>,
}

impl FixedTicks {
    pub fn new(range: Range<f64>, ticks: &[f64]) -> FixedTicks {
        let ticks = ticks
            .iter()
            .cloned()
            .filter(|t| *t >= range.start && *t <= range.end)
            .collect();
        FixedTicks {
            inner: range.into(),
            ticks,
        }
    }
}

impl Ranged for FixedTicks {
    type FormatOption = DefaultFormatting;
    type ValueType = f64;

    fn map(&self, value: &f64, limit: (i32, i32)) -> i32 {
        self.inner.map(value, limit)
    }

    fn key_points<Hint: KeyPointHint>(&self, hint: Hint) -> Vec<f64> {
        if hint.weight().allow_light_points() {
            Vec::new()
        } else {
            self.ticks.clone()
        }
    }

    fn range(&self) -> Range<f64> {
        self.inner.range()
    }
}

fn render_err<E: std::fmt::Display>(e: E) -> PlotErr {
    PlotErr::RenderErr(e.to_string())
}

#[cfg(test)]
mod tests {
    use crate::common::time_series::TimeSeries;
    use crate::plot::{axis_range, render, ChartStyle, FixedTicks};
    use plotters::coord::ranged1d::{BoldPoints, LightPoints, Ranged};
    use crate::{PlotErr, Result};
    use std::fs;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn default_ticks() {
        let style = ChartStyle::default();
        assert_eq!(style.x_ticks, vec![100.0, 200.0, 300.0, 400.0, 500.0, 600.0, 700.0]);
        assert_eq!(style.y_ticks.len(), 11);
        assert_eq!(style.y_ticks.first(), Some(&50.0));
        assert_eq!(style.y_ticks.last(), Some(&550.0));
    }

    #[test]
    fn range_covers_ticks_and_data() {
        let range = axis_range(vec![50.0, 900.0].into_iter(), &[100.0, 700.0]);
        assert!(range.start < 50.0);
        assert!(range.end > 900.0);

        let range = axis_range(vec![300.0].into_iter(), &[100.0, 700.0]);
        assert!(range.start < 100.0 && range.start > 60.0);
        assert!(range.end > 700.0 && range.end < 740.0);
    }

    #[test]
    fn range_ignores_non_finite() {
        let range = axis_range(vec![std::f64::NAN, std::f64::INFINITY, 2.0].into_iter(), &[1.0]);
        assert!(range.start.is_finite() && range.end.is_finite());
        assert!(range.start < 1.0 && range.end > 2.0);
    }

    #[test]
    fn range_never_degenerate() {
        let range = axis_range(Vec::new().into_iter(), &[]);
        assert!((range.start + 0.05).abs() < 1e-9);
        assert!((range.end - 1.05).abs() < 1e-9);
        let range = axis_range(vec![3.0].into_iter(), &[]);
        assert!(range.end > range.start);
    }

    #[test]
    fn read_style_from_yaml() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "title: link usage")?;
        writeln!(file, "x_ticks: [0, 10, 20]")?;
        let style = ChartStyle::from_file(file.path())?;
        assert_eq!(style.title, "link usage");
        assert_eq!(style.x_ticks, vec![0.0, 10.0, 20.0]);
        assert_eq!(style.y_ticks, ChartStyle::default().y_ticks);
        Ok(())
    }

    #[test]
    fn reject_empty_canvas() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "width: 0")?;
        match ChartStyle::from_file(file.path()) {
            Err(PlotErr::ConfigErr(_)) => Ok(()),
            other => panic!("expect config error, got {:?}", other),
        }
    }

    #[test]
    fn render_empty_series() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("empty.svg");
        render(
            &TimeSeries::new("Input"),
            &TimeSeries::new("Output"),
            &path,
            &ChartStyle::default(),
        )?;
        assert!(fs::metadata(&path)?.len() > 0);
        Ok(())
    }

    fn count_circles(svg: &str, fill: &str) -> usize {
        svg.split("<circle")
            .skip(1)
            .filter(|element| {
                let element = &element[..element.find("/>").unwrap_or(element.len())];
                element.contains(&format!("fill=\"{}\"", fill))
            })
            .count()
    }

    #[test]
    fn render_overwrites_existing_file() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("chart.svg");
        fs::write(&path, "stale")?;
        let mut input = TimeSeries::new("Input");
        input.add(100.0, 20.0);
        input.add(200.0, 40.0);
        input.add(std::f64::NAN, 40.0);
        let mut output = TimeSeries::new("Output");
        output.add(105.0, 19.0);
        render(&input, &output, &path, &ChartStyle::default())?;
        let content = fs::read_to_string(&path)?;
        assert!(content.starts_with("<svg"));
        assert!(content.contains("Time"));

        // one marker per finite point plus the legend marker
        assert_eq!(count_circles(&content, "#0000FF"), 3);
        assert_eq!(count_circles(&content, "#008000"), 2);
        Ok(())
    }

    #[test]
    fn render_png() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("inputvsoutput1.png");
        let mut input = TimeSeries::new("Input");
        input.add(300.0, 120.0);
        render(&input, &TimeSeries::new("Output"), &path, &ChartStyle::default())?;
        let content = fs::read(&path)?;
        assert_eq!(&content[..4], b"\x89PNG");
        Ok(())
    }

    #[test]
    fn range_stays_finite_for_huge_values() {
        let range = axis_range(vec![-1e308, 1e308].into_iter(), &[100.0, 700.0]);
        assert!(range.start.is_finite() && range.end.is_finite());
        assert!(range.start <= -1e308);
        assert!(range.end >= 1e308);

        let range = axis_range(vec![std::f64::MIN, std::f64::MAX].into_iter(), &[]);
        assert_eq!(range, std::f64::MIN..std::f64::MAX);
    }

    #[test]
    fn render_huge_values() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("huge.svg");
        let mut input = TimeSeries::new("Input");
        input.add(-1e308, 1.0);
        input.add(1e308, 2.0);
        render(&input, &TimeSeries::new("Output"), &path, &ChartStyle::default())?;
        assert!(fs::metadata(&path)?.len() > 0);
        Ok(())
    }

    #[test]
    fn fixed_ticks_are_key_points() {
        let axis = FixedTicks::new(0.0..800.0, &ChartStyle::default().x_ticks);
        assert_eq!(
            axis.key_points(BoldPoints(10)),
            vec![100.0, 200.0, 300.0, 400.0, 500.0, 600.0, 700.0]
        );
        assert!(axis.key_points(LightPoints::new(10, 100)).is_empty());

        let axis = FixedTicks::new(150.0..450.0, &ChartStyle::default().x_ticks);
        assert_eq!(axis.key_points(BoldPoints(10)), vec![200.0, 300.0, 400.0]);
        assert_eq!(axis.range(), 150.0..450.0);
    }
}

use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

use crate::common::time_point::{TimePoint, Timestamp, Value};
use crate::{PlotErr, Result};

/// Time offset of the input log.
pub const INPUT_TIME_OFFSET: Timestamp = 0.0;
/// Time offset added to the output log to line it up with the input log.
pub const OUTPUT_TIME_OFFSET: Timestamp = 5.0;
pub const BYTES_PER_KILOBYTE: Value = 1000.0;

#[derive(Clone, Debug)]
pub struct TimeSeries {
    name: String,
    time_points: Vec<TimePoint>,
}

impl TimeSeries {
    pub fn new(name: &str) -> Self {
        TimeSeries {
            name: name.to_string(),
            time_points: Vec::new(),
        }
    }

    pub fn from_data(name: &str, time_points: Vec<TimePoint>) -> Self {
        TimeSeries {
            name: name.to_string(),
            time_points,
        }
    }

    /// Read `<time> <bytes>` records from `path`, shifting every time by `offset`
    /// and scaling bytes to kilobytes.
    ///
    /// The file is closed before this returns, whether parsing succeeded or not.
    pub fn load<P: AsRef<Path>>(name: &str, path: P, offset: Timestamp) -> Result<TimeSeries> {
        let path = path.as_ref();
        let series = {
            let file = File::open(path).map_err(|e| PlotErr::FileIoErr(path.to_path_buf(), e))?;
            TimeSeries::from_reader(name, BufReader::new(file), offset).map_err(|e| match e {
                PlotErr::IoErr(e) => PlotErr::FileIoErr(path.to_path_buf(), e),
                e => e,
            })?
        };
        debug!("loaded {} points for {} from {:?}", series.len(), name, path);
        Ok(series)
    }

    pub fn from_reader<R: BufRead>(name: &str, reader: R, offset: Timestamp) -> Result<TimeSeries> {
        let time_points = SeriesReader::new(reader, offset).collect::<Result<Vec<TimePoint>>>()?;
        Ok(TimeSeries::from_data(name, time_points))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn add(&mut self, timestamp: Timestamp, value: Value) {
        self.time_points.push(TimePoint::new(timestamp, value))
    }

    pub fn time_points(&self) -> &Vec<TimePoint> {
        &self.time_points
    }

    pub fn times(&self) -> Vec<Timestamp> {
        self.time_points.iter().map(|tp| tp.timestamp).collect()
    }

    pub fn values(&self) -> Vec<Value> {
        self.time_points.iter().map(|tp| tp.value).collect()
    }

    pub fn len(&self) -> usize {
        self.time_points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time_points.is_empty()
    }
}

///
/// Lazily parse records out of a line source.
///
/// Each non-empty line yields one `TimePoint`; blank lines are skipped and
/// any tokens after the second one are ignored.
pub struct SeriesReader<R: BufRead> {
    lines: Lines<R>,
    line_no: usize,
    offset: Timestamp,
}

impl<R: BufRead> SeriesReader<R> {
    pub fn new(reader: R, offset: Timestamp) -> SeriesReader<R> {
        SeriesReader {
            lines: reader.lines(),
            line_no: 0,
            offset,
        }
    }

    fn parse_line(&self, line: &str) -> Result<TimePoint> {
        let mut tokens = line.split_whitespace();
        let (time, bytes) = match (tokens.next(), tokens.next()) {
            (Some(time), Some(bytes)) => (time, bytes),
            _ => return Err(PlotErr::MissingFieldErr { line: self.line_no }),
        };
        let time = parse_token(time, self.line_no)?;
        let bytes = parse_token(bytes, self.line_no)?;
        Ok(TimePoint::new(time + self.offset, bytes / BYTES_PER_KILOBYTE))
    }
}

fn parse_token(token: &str, line: usize) -> Result<f64> {
    token.parse::<f64>().map_err(|_| PlotErr::ParseErr {
        line,
        token: token.to_string(),
    })
}

impl<R: BufRead> Iterator for SeriesReader<R> {
    type Item = Result<TimePoint>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(e.into())),
            };
            self.line_no += 1;
            if line.trim().is_empty() {
                continue;
            }
            return Some(self.parse_line(&line));
        }
    }
}

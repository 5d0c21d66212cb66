use kbplot::option::PlotOpts;
use kbplot::time_series::{TimeSeries, INPUT_TIME_OFFSET, OUTPUT_TIME_OFFSET};
use kbplot::{app, plot, show, Result};

#[macro_use]
extern crate log;

///
/// Binary command line wrapper for application
/// args:
/// input, -i, default input.txt, the input log
/// output, -o, default output1.txt, the output log, shifted by 5 time units
/// image, default inputvsoutput1.png, where the chart goes
///
fn main() {
    env_logger::init();

    let matches = app().get_matches();
    let result = PlotOpts::get_config(&matches).and_then(|options| run(&options));
    if let Err(e) = result {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(options: &PlotOpts) -> Result<()> {
    let input = TimeSeries::load("Input", options.input(), INPUT_TIME_OFFSET)?;
    let output = TimeSeries::load("Output", options.output(), OUTPUT_TIME_OFFSET)?;

    plot::render(&input, &output, options.image(), options.style())?;

    if options.show() {
        // the chart is already on disk, a missing viewer does not fail the run
        if let Err(e) = show::show(options.image()) {
            warn!("{}, chart left at {:?}", e, options.image());
        }
    } else {
        debug!("viewer skipped");
    }
    Ok(())
}

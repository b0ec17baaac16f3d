use anyhow::{Result, bail};
use clap::Parser;
use lab_editor::{
    editor::{self, Editor},
    lab::{self, DEFAULT_STEPS},
    runtime::RealRuntime,
    setup::{Launch, interactive_setup},
};
use std::io;
use std::path::PathBuf;

/// lab-editor - Lab submission editor
///
/// Open or create a lab submission file for editing. Run without arguments
/// for an interactive setup.
#[derive(Parser, Debug)]
#[command(
    name = "lab-editor",
    author,
    version = env!("LAB_EDITOR_VERSION"),
    about,
    after_help = "\
Examples:
  lab-editor myfile.txt           Open/create myfile.txt with 6 steps
  lab-editor myfile.txt -s8       Open/create myfile.txt with 8 steps
  lab-editor -a1 -c2 -l1 -s6      Creates activity-01_ch_02_lab_01.txt (6 steps)
  lab-editor                      Interactive setup

Keys:
  ^N/PgDn  next step     ^P/PgUp  previous step
  ^L       clear step    ^S       save
  ^Q       quit (twice to discard changes)"
)]
struct Cli {
    /// Open/create this file directly
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Activity number (e.g. -a1)
    #[arg(short = 'a', value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    activity: Option<u32>,

    /// Chapter number (e.g. -c2)
    #[arg(short = 'c', value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    chapter: Option<u32>,

    /// Lab number (e.g. -l1)
    #[arg(short = 'l', value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    lab: Option<u32>,

    /// Number of steps [default: 6]
    #[arg(short = 's', value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    steps: Option<u32>,
}

impl Cli {
    /// The file to open, or `None` when nothing was given and the
    /// interactive setup should run.
    fn launch(&self) -> Result<Option<Launch>> {
        let steps = self.steps.map(|n| n as usize).unwrap_or(DEFAULT_STEPS);
        let any_activity_flag =
            self.activity.is_some() || self.chapter.is_some() || self.lab.is_some();

        let path = match &self.file {
            Some(file) => file.clone(),
            None if any_activity_flag => PathBuf::from(lab::activity_file_name(
                self.activity.unwrap_or(1),
                self.chapter.unwrap_or(1),
                self.lab.unwrap_or(1),
            )),
            None if self.steps.is_none() => return Ok(None),
            None => bail!("No filename or -a/-c/-l flags given. See 'lab-editor --help'."),
        };

        Ok(Some(Launch { path, steps }))
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let runtime = RealRuntime;

    let launch = match cli.launch()? {
        Some(launch) => launch,
        None => interactive_setup(&mut io::stdin().lock(), &mut io::stdout())?,
    };

    let steps = lab::open_or_create(&runtime, &launch.path, launch.steps);
    let mut editor = Editor::new(runtime, &launch.path, steps);
    editor::run(&mut editor)?;

    println!("Done. File: {}", launch.path.display());
    Ok(())
}

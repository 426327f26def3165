use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter},
};

fn is_standard_io(path: &str) -> bool {
    path == "-"
}

/// Open a line reader; "-" is stdin.
pub fn open_reader(path: &str) -> Result<Box<dyn BufRead>, Box<dyn std::error::Error>> {
    Ok(if is_standard_io(path) {
        Box::new(BufReader::new(std::io::stdin().lock()))
    } else {
        Box::new(BufReader::new(File::open(path)?))
    })
}

/// Output argument group.
#[derive(clap::Args, Debug)]
pub struct OutputArgs {
    /// Optional output file; "-" may be used to indicate stdout.
    #[clap(long, default_value = None)]
    pub output: Option<String>,
}

impl OutputArgs {
    /// Open a writer for the output.
    pub fn open_writer(&self) -> Result<Box<dyn std::io::Write>, Box<dyn std::error::Error>> {
        Ok(match self.output.as_deref() {
            Some(p) if !is_standard_io(p) => Box::new(BufWriter::new(File::create(p)?)),
            _ => Box::new(BufWriter::new(std::io::stdout().lock())),
        })
    }
}

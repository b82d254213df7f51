//! # Candela CLI
//!
//! Command-line utility for exercising an A2 thermal printer.
//!
//! ## Usage
//!
//! ```bash
//! # Print the firmware self-test page
//! candela --device /dev/ttyUSB0 test-page
//!
//! # Check the paper sensor
//! candela has-paper
//!
//! # Print the formatting demo receipt
//! candela demo
//!
//! # Print a barcode
//! candela barcode --symbology ean13 012345678901
//!
//! # Print a 384px-wide image
//! candela image logo.png
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use candela::{
    CandelaError, Printer, PrinterConfig, SerialTransport, protocol::barcode::Symbology,
};

/// Candela - A2 thermal printer utility
#[derive(Parser, Debug)]
#[command(name = "candela")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Printer serial device path
    #[arg(long, default_value = candela::transport::serial::DEFAULT_DEVICE)]
    device: String,

    /// Max simultaneous heat dots, unit 8 dots
    #[arg(long, default_value = "7")]
    max_dots: u8,

    /// Heating time, unit 10µs
    #[arg(long, default_value = "80")]
    heating_time: u8,

    /// Heating interval, unit 10µs
    #[arg(long, default_value = "2")]
    heating_interval: u8,

    /// Pause before each command, in microseconds
    #[arg(long, default_value = "0")]
    command_delay: u64,

    /// Encode text with national charset switching
    #[arg(long)]
    extended_charset: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Symbology names accepted on the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
enum SymbologyArg {
    UpcA,
    UpcE,
    Ean13,
    Ean8,
    Code39,
    I25,
    Codebar,
    Code93,
    Code128,
    Code11,
    Msi,
}

impl From<SymbologyArg> for Symbology {
    fn from(arg: SymbologyArg) -> Self {
        match arg {
            SymbologyArg::UpcA => Symbology::UpcA,
            SymbologyArg::UpcE => Symbology::UpcE,
            SymbologyArg::Ean13 => Symbology::Ean13,
            SymbologyArg::Ean8 => Symbology::Ean8,
            SymbologyArg::Code39 => Symbology::Code39,
            SymbologyArg::I25 => Symbology::I25,
            SymbologyArg::Codebar => Symbology::Codebar,
            SymbologyArg::Code93 => Symbology::Code93,
            SymbologyArg::Code128 => Symbology::Code128,
            SymbologyArg::Code11 => Symbology::Code11,
            SymbologyArg::Msi => Symbology::Msi,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print a receipt exercising text styles, rules and a barcode
    Demo,

    /// Print a single barcode
    Barcode {
        /// Barcode payload
        payload: String,

        /// Symbology to encode with
        #[arg(long, value_enum, default_value = "code39")]
        symbology: SymbologyArg,

        /// Bar height in dots
        #[arg(long, default_value = "80")]
        height: u8,
    },

    /// Print an image file (must be exactly 384 pixels wide)
    Image {
        /// Path to the image file
        path: PathBuf,
    },

    /// Print the firmware self-test page
    TestPage,

    /// Query the paper sensor
    HasPaper,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), CandelaError> {
    let cli = Cli::parse();

    let config = PrinterConfig::default()
        .with_max_printing_dots(cli.max_dots)
        .with_heating_time(cli.heating_time)
        .with_heating_interval(cli.heating_interval)
        .with_command_delay_us(cli.command_delay)
        .with_extended_charset(cli.extended_charset);

    let transport = SerialTransport::open(&cli.device)?;
    let mut printer = Printer::new(transport, config)?;

    match cli.command {
        Commands::Demo => {
            let now = chrono::Local::now();
            printer
                .align_center()
                .big(true)
                .print_line("CANDELA")
                .big(false)
                .print_line(&now.format("%Y-%m-%d %H:%M").to_string())
                .horizontal_line(32)
                .align_left()
                .bold(true)
                .print_line("bold text")
                .bold(false)
                .inverse(true)
                .print_line("inverse text")
                .inverse(false)
                .underline(1)
                .print_line("underlined text")
                .underline(0)
                .indent(10)
                .print_line("indented text")
                .indent(0)
                .align_right()
                .print_line("right aligned")
                .align_center()
                .barcode_height(60)
                .barcode_text_position(2)?
                .barcode(Symbology::Code39, "CANDELA-1")?
                .line_feed(3);
            printer.flush()?;
            println!("Printed demo receipt.");
        }

        Commands::Barcode {
            payload,
            symbology,
            height,
        } => {
            printer
                .align_center()
                .barcode_height(height)
                .barcode_text_position(2)?
                .barcode(symbology.into(), &payload)?
                .line_feed(3);
            printer.flush()?;
            println!("Printed {:?} barcode.", Symbology::from(symbology));
        }

        Commands::Image { path } => {
            println!("Printing {}...", path.display());
            printer.print_image_file(&path)?.line_feed(3);
            printer.flush()?;
            println!("Printed image.");
        }

        Commands::TestPage => {
            printer.test_page();
            printer.flush()?;
            println!("Printed test page.");
        }

        Commands::HasPaper => {
            if printer.has_paper()? {
                println!("Paper: present");
            } else {
                println!("Paper: OUT");
            }
        }
    }

    Ok(())
}

//! bytemapctl - byte-map command line tool
//!
//! The interactive caller around the pure codec: a numeric converter
//! with byte/bit order control, and a field mapper that packs named
//! signals into an 8-byte frame and back out. The field list and the
//! byte-order preference persist in a local key-value store and are
//! saved after every mutating command; the frame itself is supplied
//! per decode call.

mod commands;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use bytemap_session::FileStore;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "bytemapctl")]
#[command(about = "byte-map - decimal/binary/hex converter and 8-byte frame mapper")]
#[command(long_about = "byte-map - decimal/binary/hex converter and 8-byte frame mapper

Numeric Conversion:
  types       List the IEC 61131-3 integer types
  convert     Render a decimal value as binary and hex

Frame Mapping:
  fields      Manage the bit-field list (add, list, set, remove)
  encode      Pack all field values into the 8-byte frame
  decode      Unpack field values from a frame
  reset       Clear the frame and the field list

Interchange:
  export      Write the field list to a stamped JSON/CSV file
  import      Replace the field list from a JSON/CSV file

Examples:
  bytemapctl convert -t INT -- -1            # two's complement of -1
  bytemapctl fields add speed --bit-length 16 --signed
  bytemapctl fields set speed value 1200
  bytemapctl encode
  bytemapctl decode --frame \"04 B0 00 00 00 00 00 00\"

Use 'bytemapctl <command> --help' for more information on a specific command.")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Session store file (default: ./byte-map.json)
    #[arg(short = 'd', long = "data-path", global = true)]
    data_path: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    // === Numeric Conversion Commands ===
    /// List the IEC 61131-3 integer types
    Types,

    /// Render a decimal value as binary and hex
    Convert {
        /// Decimal value (use `--` before negative values)
        value: String,

        /// IEC 61131-3 type name, e.g. INT or ULINT
        #[arg(short = 't', long = "type", default_value = "INT")]
        type_name: String,

        /// Byte order: MSB or LSB (default: the persisted preference)
        #[arg(short, long)]
        byte_order: Option<String>,

        /// Bit order: MSB or LSB
        #[arg(long, default_value = "MSB")]
        bit_order: String,
    },

    // === Frame Mapping Commands ===
    /// Manage the bit-field list
    Fields {
        #[command(subcommand)]
        command: FieldCommands,
    },

    /// Pack all field values into the 8-byte frame
    Encode,

    /// Unpack field values from a frame
    Decode {
        /// Frame bytes as hex, e.g. "04 B0 00 00 00 00 00 00" or
        /// "04B0000000000000" (default: an all-zero frame)
        #[arg(short, long)]
        frame: Option<String>,
    },

    /// Clear the frame and the field list
    ///
    /// Fields are reference data for the current frame and do not
    /// survive a frame reset.
    Reset,

    // === Interchange Commands ===
    /// Write the field list to a stamped JSON/CSV file
    Export {
        /// Output format: json or csv
        #[arg(short, long, default_value = "json")]
        format: String,

        /// Output directory (default: current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Replace the field list from a JSON/CSV file
    Import {
        /// Source file; the format follows the extension
        file: PathBuf,
    },
}

#[derive(Subcommand)]
enum FieldCommands {
    /// Add a field (defaults: 8 bits at position 0, MSB/MSB, unsigned)
    Add {
        /// Field name
        name: String,

        #[arg(long)]
        bit_start: Option<u8>,

        #[arg(long)]
        bit_length: Option<u8>,

        /// Byte order: MSB or LSB
        #[arg(long)]
        byte_order: Option<String>,

        /// Bit order: MSB or LSB
        #[arg(long)]
        bit_order: Option<String>,

        /// Treat the value as signed (two's complement)
        #[arg(long)]
        signed: bool,

        /// Initial decimal value
        #[arg(long)]
        value: Option<String>,
    },

    /// List fields with their advisory validation state
    List,

    /// Update one property of a field
    ///
    /// Properties: name, bit-start, bit-length, byte-order, bit-order,
    /// signed, value
    Set {
        /// Field name or id prefix
        field: String,

        /// Property to update
        property: String,

        /// New value
        new_value: String,
    },

    /// Remove a field
    Remove {
        /// Field name or id prefix
        field: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Configure colored output
    if cli.no_color {
        colored::control::set_override(false);
    }

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_target(false)
        .init();

    let store_path = cli
        .data_path
        .unwrap_or_else(|| PathBuf::from("byte-map.json"));
    let store = FileStore::new(store_path);

    match cli.command {
        Commands::Types => commands::types(),
        Commands::Convert {
            value,
            type_name,
            byte_order,
            bit_order,
        } => commands::convert(&store, &value, &type_name, byte_order.as_deref(), &bit_order),
        Commands::Fields { command } => match command {
            FieldCommands::Add {
                name,
                bit_start,
                bit_length,
                byte_order,
                bit_order,
                signed,
                value,
            } => commands::fields_add(
                &store,
                &name,
                commands::FieldInit {
                    bit_start,
                    bit_length,
                    byte_order,
                    bit_order,
                    signed,
                    value,
                },
            ),
            FieldCommands::List => commands::fields_list(&store),
            FieldCommands::Set {
                field,
                property,
                new_value,
            } => commands::fields_set(&store, &field, &property, &new_value),
            FieldCommands::Remove { field } => commands::fields_remove(&store, &field),
        },
        Commands::Encode => commands::encode(&store),
        Commands::Decode { frame } => commands::decode(&store, frame.as_deref()),
        Commands::Reset => commands::reset(&store),
        Commands::Export { format, output } => {
            commands::export(&store, &format, output.as_deref())
        },
        Commands::Import { file } => commands::import(&store, &file),
    }
}

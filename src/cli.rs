use crate::codec::{Encoded, HuffmanCodec};
use crate::codes::CodeTable;
use crate::config::{CodecConfig, DecodePolicy};
use crate::error::{HuffmanError, Result};
use crate::frequency::FrequencyTable;
use crate::serializer;
use crate::stats::{compression_ratio, CompressionStats};
use crate::tree::display_symbol;
use clap::{Parser, Subcommand};
use log::info;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Texts exercised by the `demo` command.
pub const DEMO_TEXTS: [&str; 6] = [
    "hello world",
    "aabbbcccc",
    "mississippi",
    "The quick brown fox jumps over the lazy dog",
    "aaaaaaaaaa",
    "abc",
];

#[derive(Parser)]
#[command(author, version, about, long_about = "Huffman coding for text, producing '0'/'1' bit strings")]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Encodes text into a bit string
    Encode {
        /// Text to encode
        text: Option<String>,

        /// Read the text from a file instead
        #[arg(short, long, value_name = "FILE", conflicts_with = "text")]
        input: Option<PathBuf>,

        /// Print the result and statistics as JSON
        #[arg(long)]
        json: bool,

        /// Draw the Huffman tree
        #[arg(long)]
        tree: bool,

        /// Write the code table as JSON
        #[arg(long, value_name = "FILE")]
        codes_out: Option<PathBuf>,

        /// Write the frequency table as JSON (needed to decode)
        #[arg(long, value_name = "FILE")]
        freq_out: Option<PathBuf>,
    },
    /// Decodes a bit string back into text
    Decode {
        /// Bit string to decode
        bits: Option<String>,

        /// Read the bit string from a file instead
        #[arg(short, long, value_name = "FILE", conflicts_with = "bits")]
        input: Option<PathBuf>,

        /// Frequency table produced by `encode --freq-out`
        #[arg(short, long, value_name = "FILE")]
        freq: PathBuf,

        /// How to treat bits that do not form a code [lenient, strict]
        #[arg(short, long, default_value = "lenient")]
        policy: DecodePolicy,
    },
    /// Runs the built-in demonstration
    Demo,
    /// Starts a menu-driven session on standard input
    Interactive,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let stdout = io::stdout();
    execute(cli.command, &mut stdout.lock())
}

/// Run `command`, writing human-readable output to `out`.
pub fn execute<W: Write>(command: Commands, out: &mut W) -> Result<()> {
    match command {
        Commands::Encode { text, input, json, tree, codes_out, freq_out } => {
            let text = read_source(text, input.as_deref(), "text")?;
            let mut codec = HuffmanCodec::default();
            let encoded = codec.encode(&text);

            if let Some(path) = codes_out {
                serializer::to_writer(&mut BufWriter::new(File::create(&path)?), &encoded.code_table)?;
                info!("wrote code table to {}", path.display());
            }
            if let Some(path) = freq_out {
                serializer::frequency_to_writer(&mut BufWriter::new(File::create(&path)?), &encoded.freq_table)?;
                info!("wrote frequency table to {}", path.display());
            }

            if json {
                #[derive(Serialize)]
                struct Report<'a> {
                    #[serde(flatten)]
                    encoded: &'a Encoded,
                    stats: CompressionStats,
                }
                let report = Report { stats: CompressionStats::from_encoded(&encoded), encoded: &encoded };
                writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
            } else {
                writeln!(out, "Encoded: {}", encoded.encoded_text)?;
                writeln!(out, "Encoded length: {} bits", encoded.bit_len())?;
                writeln!(out, "Compression ratio: {:.2}%", compression_ratio(&text, &encoded.encoded_text))?;
                write_frequencies(out, &encoded.freq_table)?;
                write_codes(out, &encoded.code_table)?;
            }

            if tree {
                write_tree(out, &codec)?;
            }
        }
        Commands::Decode { bits, input, freq, policy } => {
            let bits = read_source(bits, input.as_deref(), "bit string")?;
            let freq_table = serializer::frequency_from_reader(&mut BufReader::new(File::open(&freq)?))?;

            let mut codec = HuffmanCodec::new(CodecConfig::default().with_policy(policy));
            let decoded = codec.decode(bits.trim(), &freq_table)?;
            writeln!(out, "{}", decoded)?;
        }
        Commands::Demo => run_demo(out)?,
        Commands::Interactive => interactive(&mut BufReader::new(io::stdin()), out)?,
    }

    Ok(())
}

fn read_source(inline: Option<String>, path: Option<&Path>, what: &str) -> Result<String> {
    match (inline, path) {
        (Some(value), _) => Ok(value),
        (None, Some(path)) => Ok(fs::read_to_string(path)?),
        (None, None) => Err(HuffmanError::ConfigError(format!("no {} given; pass it inline or with --input", what))),
    }
}

pub fn write_frequencies<W: Write>(out: &mut W, table: &FrequencyTable) -> Result<()> {
    writeln!(out, "\nFrequency table:")?;
    for (symbol, count) in table.iter() {
        writeln!(out, "  {}: {}", display_symbol(symbol), count)?;
    }
    Ok(())
}

pub fn write_codes<W: Write>(out: &mut W, table: &CodeTable) -> Result<()> {
    writeln!(out, "\nHuffman Codes:")?;
    writeln!(out, "{}", "-".repeat(30))?;
    for (symbol, code) in table.iter() {
        writeln!(out, "{}: {}", display_symbol(symbol), code)?;
    }
    Ok(())
}

fn write_tree<W: Write>(out: &mut W, codec: &HuffmanCodec) -> Result<()> {
    writeln!(out, "\nHuffman Tree Visualization:")?;
    match codec.tree() {
        Some(tree) => write!(out, "{}", tree)?,
        None => writeln!(out, "(no tree: fewer than two distinct symbols)")?,
    }
    Ok(())
}

/// Encode and decode every demo text, reporting each step.
pub fn run_demo<W: Write>(out: &mut W) -> Result<()> {
    let banner = "=".repeat(60);
    writeln!(out, "{}\nHUFFMAN CODING DEMO\n{}", banner, banner)?;

    let mut codec = HuffmanCodec::default();
    let rule = "=".repeat(20);
    for (index, text) in DEMO_TEXTS.iter().enumerate() {
        writeln!(out, "\n{} TEST CASE {} {}", rule, index + 1, rule)?;
        writeln!(out, "Original text: '{}'", text)?;
        writeln!(out, "Length: {} characters", text.chars().count())?;

        let encoded = codec.encode(text);
        writeln!(out, "Encoded text: {}", encoded.encoded_text)?;
        writeln!(out, "Encoded length: {} bits", encoded.bit_len())?;
        writeln!(out, "Compression ratio: {:.2}%", compression_ratio(text, &encoded.encoded_text))?;

        write_frequencies(out, &encoded.freq_table)?;
        write_codes(out, &encoded.code_table)?;

        let decoded = codec.decode(&encoded.encoded_text, &encoded.freq_table)?;
        writeln!(out, "\nDecoded text: '{}'", decoded)?;
        writeln!(out, "Decoding successful: {}", decoded == *text)?;

        if index == 0 {
            write_tree(out, &codec)?;
        }
    }
    Ok(())
}

/// Menu loop: 1 encode, 2 decode the last encoding, 3 demo, 4 exit.
/// End of input also exits.
pub fn interactive<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<()> {
    let banner = "=".repeat(60);
    writeln!(out, "\n{}\nINTERACTIVE HUFFMAN CODING\n{}", banner, banner)?;

    let mut codec = HuffmanCodec::default();
    let mut last: Option<Encoded> = None;

    loop {
        writeln!(out, "\nOptions:\n1. Encode text\n2. Decode text\n3. Run demo\n4. Exit")?;
        write!(out, "\nEnter your choice (1-4): ")?;
        out.flush()?;

        let Some(choice) = read_line(input)? else { break };
        match choice.trim() {
            "1" => {
                write!(out, "Enter text to encode: ")?;
                out.flush()?;
                let Some(text) = read_line(input)? else { break };
                if text.is_empty() {
                    continue;
                }
                let encoded = codec.encode(&text);
                writeln!(out, "\nEncoded: {}", encoded.encoded_text)?;
                writeln!(out, "Compression ratio: {:.2}%", compression_ratio(&text, &encoded.encoded_text))?;
                write_codes(out, &encoded.code_table)?;
                last = Some(encoded);
            }
            "2" => match &last {
                Some(encoded) => {
                    let decoded = codec.decode(&encoded.encoded_text, &encoded.freq_table)?;
                    writeln!(out, "\nDecoded: {}", decoded)?;
                }
                None => writeln!(out, "No encoded text available. Please encode first.")?,
            },
            "3" => run_demo(out)?,
            "4" => {
                writeln!(out, "Goodbye!")?;
                return Ok(());
            }
            _ => writeln!(out, "Invalid choice. Please try again.")?,
        }
    }
    Ok(())
}

/// Next line without its terminator, or `None` at end of input.
fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    while line.ends_with('\n') || line.ends_with('\r') {
        line.pop();
    }
    Ok(Some(line))
}

use huffman_rust::huffman::FrequencyTable;
use huffman_rust::{compress, decompress, HuffmanError};

use std::time::Instant;
use std::{fs, process};

use clap::{Parser, Subcommand};
use serde::Serialize;

const EXIT_IO_FAILURE: i32 = 1;
const EXIT_CORRUPT: i32 = 2;

#[derive(Parser, Debug)]
#[command(about = "Compress and decompress files with static Huffman coding")]
struct Args {
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Subcommand, Debug)]
enum Mode {
    /// Compress a file into a Huffman container
    Compress {
        /// Source filename
        source_name: String,
        /// Destination filename
        dest_name: String,
        /// Print a JSON record with compression statistics
        #[arg(long)]
        stats: bool,
    },
    /// Restore the original file from a Huffman container
    Decompress {
        /// Source filename
        source_name: String,
        /// Destination filename
        dest_name: String,
    },
}

#[derive(Serialize, Debug)]
struct CompressionStats {
    original_bytes: usize,
    compressed_bytes: usize,
    ratio: f64,
    distinct_symbols: usize,
}

fn main() {
    let args = Args::parse();

    match args.mode {
        Mode::Compress {
            source_name,
            dest_name,
            stats,
        } => run_compress(&source_name, &dest_name, stats),
        Mode::Decompress {
            source_name,
            dest_name,
        } => run_decompress(&source_name, &dest_name),
    }
}

fn run_compress(source_name: &str, dest_name: &str, stats: bool) {
    let input = read_file(source_name);

    let comp_time = Instant::now();
    let container = compress(&input).unwrap_or_else(|e| fail_codec(e));
    let comp_time = comp_time.elapsed().as_nanos() as f64;
    println!("compressed {source_name} in {comp_time}ns");

    write_file(dest_name, &container);

    if stats {
        let record = CompressionStats {
            original_bytes: input.len(),
            compressed_bytes: container.len(),
            ratio: container.len() as f64 / input.len().max(1) as f64,
            distinct_symbols: FrequencyTable::from_bytes(&input).distinct_symbols(),
        };
        println!("{}", serde_json::to_string_pretty(&record).unwrap());
    }
}

fn run_decompress(source_name: &str, dest_name: &str) {
    let container = read_file(source_name);

    let comp_time = Instant::now();
    let output = decompress(&container).unwrap_or_else(|e| fail_codec(e));
    let comp_time = comp_time.elapsed().as_nanos() as f64;
    println!("decompressed {source_name} in {comp_time}ns");

    write_file(dest_name, &output);
}

fn read_file(name: &str) -> Vec<u8> {
    fs::read(name).unwrap_or_else(|e| {
        eprintln!("failed reading {name}: {e}");
        process::exit(EXIT_IO_FAILURE)
    })
}

fn write_file(name: &str, bytes: &[u8]) {
    fs::write(name, bytes).unwrap_or_else(|e| {
        eprintln!("failed writing {name}: {e}");
        process::exit(EXIT_IO_FAILURE)
    })
}

fn fail_codec(e: HuffmanError) -> ! {
    eprintln!("{e}");
    process::exit(EXIT_CORRUPT)
}

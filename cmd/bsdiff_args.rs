#![forbid(unsafe_code)]
use bsdiff_args::{parse_command_line, USAGE};
use std::env;
use std::process;

fn main() {
    pretty_env_logger::init();

    let parsed = match parse_command_line(env::args_os().skip(1)) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("error: {}", e);
            eprintln!("usage: bsdiff-args [options]\n{}", USAGE);
            process::exit(1);
        }
    };
    for warning in parsed.warnings.iter() {
        eprintln!("warning: {}", warning);
    }

    let args = parsed.arguments;
    if let Err(e) = args.validate() {
        eprintln!("error: {}", e);
        process::exit(1);
    }

    let types: Vec<_> = args.compressor_types().iter().map(|ty| ty.as_str()).collect();
    println!("format: {}", args.format());
    println!("type: {}", types.join(":"));
    println!("minlen: {}", args.min_length());
    if let Some(quality) = args.brotli_quality() {
        println!("brotli_quality: {}", quality);
    }
}

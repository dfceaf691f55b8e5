use clap::{App, Arg};
use std::path::Path;
use std::process::exit;
use vdfs::Disk;
use vdfs_tool_lib::{confirm, FileImage, HostFileSink};

fn main() {
    let arguments = App::new("cpout-vdfs")
        .version("0.1.0")
        .about("This program copies a file out of a vdfs image onto the host.")
        .arg(
            Arg::with_name("image")
                .required(true)
                .takes_value(true)
                .help("The path of the image"),
        )
        .arg(
            Arg::with_name("name")
                .required(true)
                .takes_value(true)
                .help("The name of the file inside the image"),
        )
        .arg(
            Arg::with_name("output")
                .required(true)
                .takes_value(true)
                .help("The host path to write the file to"),
        )
        .get_matches();

    let path = match arguments.value_of("image") {
        Some(p) => p,
        None => {
            eprintln!("An image is required.");
            exit(1);
        }
    };

    let name = match arguments.value_of("name") {
        Some(n) => n,
        None => {
            eprintln!("A file name is required.");
            exit(1);
        }
    };

    let output = match arguments.value_of("output") {
        Some(o) => o,
        None => {
            eprintln!("An output path is required.");
            exit(1);
        }
    };

    if Path::new(output).exists() {
        if !confirm(&format!("\"{}\" already exists. Overwrite it?", output)) {
            println!("Will not copy file.");
            exit(0);
        }
    }

    let mut handler = match FileImage::new(path.to_string()) {
        Ok(h) => h,
        Err(e) => {
            eprintln!("{}", e);
            exit(1);
        }
    };

    let disk = match Disk::open(&mut handler) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Disk opening error: {}", e);
            exit(1);
        }
    };

    let mut sink = match HostFileSink::create(output) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{}", e);
            exit(1);
        }
    };

    let written = match disk.copy_out(name, &mut sink) {
        Ok(w) => w,
        Err(e) => {
            eprintln!("Error while copying: {}", e);
            exit(1);
        }
    };

    println!("Copied {} bytes to \"{}\".", written, output);
}

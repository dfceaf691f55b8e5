use clap::{App, Arg};
use std::process::exit;
use vdfs::{Disk, OverwriteChoice, VdfsError};
use vdfs_tool_lib::{confirm, sized_string_to_u64, FileImage};

fn main() {
    let arguments = App::new("add-vdfs")
        .version("0.1.0")
        .about("This program reserves space for a new file in a vdfs image.")
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
                .help("The name of the file to create"),
        )
        .arg(
            Arg::with_name("size")
                .required(true)
                .takes_value(true)
                .help("The size of the file, e.g. 600 or 4KiB"),
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

    let size = match arguments.value_of("size").and_then(sized_string_to_u64) {
        Some(s) => s,
        None => {
            eprintln!("Could not interpret the file size.");
            exit(1);
        }
    };

    let mut handler = match FileImage::new(path.to_string()) {
        Ok(h) => h,
        Err(e) => {
            eprintln!("{}", e);
            exit(1);
        }
    };

    let mut disk = match Disk::open(&mut handler) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Disk opening error: {}", e);
            exit(1);
        }
    };

    let mut on_collision = || {
        if confirm(&format!(
            "A file named \"{}\" already exists. Overwrite it?",
            name
        )) {
            OverwriteChoice::Overwrite
        } else {
            OverwriteChoice::Cancel
        }
    };

    match disk.add_file(name, size, &mut on_collision) {
        Ok(_) => (),
        Err(VdfsError::Cancelled) => {
            println!("Will not add file.");
            exit(0);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            exit(1);
        }
    }

    println!("Successfully added file!");
}

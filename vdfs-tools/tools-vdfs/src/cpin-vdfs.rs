use clap::{App, Arg};
use std::path::Path;
use std::process::exit;
use vdfs::{Disk, OverwriteChoice, VdfsError};
use vdfs_tool_lib::{confirm, FileImage, HostFileSource};

fn main() {
    let arguments = App::new("cpin-vdfs")
        .version("0.1.0")
        .about("This program copies a host file into a vdfs image.")
        .arg(
            Arg::with_name("image")
                .required(true)
                .takes_value(true)
                .help("The path of the image"),
        )
        .arg(
            Arg::with_name("file")
                .required(true)
                .takes_value(true)
                .help("The path of the file to copy in"),
        )
        .arg(
            Arg::with_name("name")
                .short("n")
                .long("name")
                .takes_value(true)
                .help("The name of the file as it should be stored in the vdfs image."),
        )
        .get_matches();

    let path = match arguments.value_of("image") {
        Some(p) => p,
        None => {
            eprintln!("An image is required.");
            exit(1);
        }
    };

    let file_path = match arguments.value_of("file") {
        Some(f) => f.to_string(),
        None => {
            eprintln!("A file to copy in is required.");
            exit(1);
        }
    };

    let name = match arguments.value_of("name") {
        Some(n) => n.to_string(),
        None => match Path::new(&file_path).file_name().and_then(|n| n.to_str()) {
            Some(n) => n.to_string(),
            None => {
                eprintln!("Could not determine a file name to use for the image.");
                exit(1);
            }
        },
    };

    let mut source = match HostFileSource::new(&file_path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{}", e);
            exit(1);
        }
    };

    let size = match source.len() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{}", e);
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

    match disk.add_file(&name, size, &mut on_collision) {
        Ok(_) => (),
        Err(VdfsError::Cancelled) => {
            println!("Will not copy file.");
            exit(0);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            exit(1);
        }
    }

    match disk.copy_in(&name, &mut source) {
        Ok(_) => (),
        Err(e) => {
            eprintln!("Error while copying: {}", e);
            exit(1);
        }
    }

    println!("Successfully copied \"{}\" into the image as \"{}\".", file_path, name);
}

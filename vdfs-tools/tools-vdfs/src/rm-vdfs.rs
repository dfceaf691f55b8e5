use clap::{App, Arg};
use std::process::exit;
use vdfs::Disk;
use vdfs_tool_lib::FileImage;

fn main() {
    let arguments = App::new("rm-vdfs")
        .version("0.1.0")
        .about("This program removes a file from a vdfs image.")
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
                .help("The name of the file to remove"),
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

    match disk.remove_file(name) {
        Ok(_) => (),
        Err(e) => {
            eprintln!("Error: {}", e);
            exit(1);
        }
    }

    println!("Successfully removed file!");
}

use clap::{App, Arg};
use std::process::exit;
use vdfs::Disk;
use vdfs_tool_lib::FileImage;

fn main() {
    let arguments = App::new("defrag-vdfs")
        .version("0.1.0")
        .about("This program packs the allocated blocks of a vdfs image.")
        .arg(
            Arg::with_name("image")
                .required(true)
                .takes_value(true)
                .help("The path of the image"),
        )
        .get_matches();

    let path = match arguments.value_of("image") {
        Some(p) => p,
        None => {
            eprintln!("An image is required.");
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

    match disk.defragment() {
        Ok(_) => (),
        Err(e) => {
            eprintln!("Error while defragmenting: {}", e);
            exit(1);
        }
    }

    println!("Defragmentation complete.");
}

use clap::{App, Arg};
use std::process::exit;
use vdfs::Disk;
use vdfs_tool_lib::{sized_string_to_u64, FileImage};

fn main() {
    let arguments = App::new("mkfs-vdfs")
        .version("0.1.0")
        .about("This program creates a new vdfs image.")
        .arg(
            Arg::with_name("image")
                .required(true)
                .takes_value(true)
                .help("The path of the image to create"),
        )
        .arg(
            Arg::with_name("size")
                .required(true)
                .takes_value(true)
                .help("The size of the disk, e.g. 640KiB or 65536"),
        )
        .arg(
            Arg::with_name("block-size")
                .short("b")
                .long("block-size")
                .takes_value(true)
                .default_value("1KiB")
                .help("The size of a data block"),
        )
        .get_matches();

    let path = match arguments.value_of("image") {
        Some(p) => p,
        None => {
            eprintln!("An image is required.");
            exit(1);
        }
    };

    let disk_size = match arguments.value_of("size").and_then(sized_string_to_u64) {
        Some(s) => s,
        None => {
            eprintln!("Could not interpret the disk size.");
            exit(1);
        }
    };

    let block_size = match arguments.value_of("block-size").and_then(sized_string_to_u64) {
        Some(s) => s,
        None => {
            eprintln!("Could not interpret the block size.");
            exit(1);
        }
    };

    let mut handler = match FileImage::new_create(path.to_string(), disk_size as usize) {
        Ok(h) => h,
        Err(e) => {
            eprintln!("{}", e);
            exit(1);
        }
    };

    match Disk::create(&mut handler, path, disk_size, block_size) {
        Ok(_) => (),
        Err(e) => {
            eprintln!("Disk creation error: {}", e);
            exit(1);
        }
    }

    println!("Virtual disk created: {} ({} bytes)", path, disk_size);
}

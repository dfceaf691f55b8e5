use clap::{App, Arg};
use std::process::exit;
use vdfs::Disk;
use vdfs_tool_lib::{u64_to_sized_string, FileImage};

const SPACER: &str = "    ";

fn main() {
    let arguments = App::new("ls-vdfs")
        .version("0.1.0")
        .about("This program lists files in a vdfs image.")
        .arg(
            Arg::with_name("image")
                .required(true)
                .takes_value(true)
                .help("The path of the image"),
        )
        .arg(
            Arg::with_name("list")
                .short("l")
                .required(false)
                .takes_value(false)
                .help("List the files with their sizes and block counts."),
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

    let disk = match Disk::open(&mut handler) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Disk opening error: {}", e);
            exit(1);
        }
    };

    let files = disk.list_files();

    if files.len() == 0 {
        println!("No files on disk.");
        return;
    }

    if arguments.is_present("list") {
        for file in &files {
            println!(
                "{:<10}{}{:<8}{}{}",
                u64_to_sized_string(file.file_size()),
                SPACER,
                format!("{} blk", file.blocks_allocated()),
                SPACER,
                file.name()
            );
        }
    } else {
        for i in 0..files.len() {
            if i != 0 && (i + 1) % 3 == 0 {
                println!("{}", files[i].name());
            } else {
                print!("{}{}", files[i].name(), SPACER);
            }
        }

        if files.len() % 3 != 0 {
            println!();
        }
    }
}

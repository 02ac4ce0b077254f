use eyemodule_reader::ImageCatalog;
use std::env;

fn main() {
    env_logger::init();
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <pdb-directory> [--image <NUMBER>]", args[0]);
        std::process::exit(1);
    }

    let pdb_dir = &args[1];
    let mut single_image: Option<usize> = None;
    if let Some(flag_idx) = args.iter().position(|arg| arg == "--image") {
        match args.get(flag_idx + 1).map(|s| s.parse::<usize>()) {
            Some(Ok(nr)) => single_image = Some(nr),
            Some(Err(_)) => {
                eprintln!("ERROR: --image expects a number.");
                std::process::exit(1);
            }
            None => {
                eprintln!("ERROR: --image flag requires an argument.");
                std::process::exit(1);
            }
        }
    }

    println!("Reading eyemodule databases from: {}", pdb_dir);
    println!("{}", "=".repeat(60));

    let mut catalog = match ImageCatalog::open(pdb_dir) {
        Ok(catalog) => catalog,
        Err(e) => {
            eprintln!("\nERROR: Failed to open the image catalog");
            eprintln!("  {}", e);
            std::process::exit(1);
        }
    };

    println!("Images in the databases: {}", catalog.image_count());
    println!();

    let range = match single_image {
        Some(nr) => nr..nr + 1,
        None => 0..catalog.image_count(),
    };

    for nr in range {
        match list_entry(&mut catalog, nr) {
            Ok(line) => println!("{}", line),
            Err(e) => {
                eprintln!("ERROR: image {}: {}", nr, e);
                std::process::exit(1);
            }
        }
    }
}

fn list_entry(
    catalog: &mut ImageCatalog,
    nr: usize,
) -> eyemodule_reader::Result<String> {
    let header = catalog.get_header(Some(nr))?;
    let category = catalog.category_of(nr)?.to_owned();
    let kind = if header.first_color_record_id.is_some() {
        "color"
    } else {
        "grayscale"
    };
    let note_marker = match catalog.note_text_of(nr)? {
        Some(_) => "  [note]",
        None => "",
    };
    Ok(format!(
        "{}. {}  ({}x{}, {})  Cat: {}  created: {} (unix){}",
        nr + 1,
        header.name,
        header.width,
        header.height,
        kind,
        category,
        header.created,
        note_marker
    ))
}

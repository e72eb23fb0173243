//! Sprite animation CLI - Inspect saved editing sessions.

use std::fs;
use std::path::PathBuf;

use sprite_anim::{
    Bitmap, EditorConfig, Frame, ImageEditor, LiteralFormat,
    editor::Command,
    persist::{self, Snapshot},
};

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <session> [ts|py]", args[0]);
        eprintln!();
        eprintln!("Print the frames of a saved sprite editing session.");
        eprintln!();
        eprintln!("Arguments:");
        eprintln!("  session  Snapshot JSON (.json) or saved session file (.span)");
        eprintln!("  format   Literal syntax for the frames (default: ts)");
        eprintln!();
        eprintln!("Example snapshot is generated with --example flag.");
        std::process::exit(1);
    }

    if args[1] == "--example" {
        print_example_snapshot();
        return;
    }

    let session_path = PathBuf::from(&args[1]);
    let format: LiteralFormat = match args.get(2) {
        Some(tag) => tag.parse().unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }),
        None => LiteralFormat::default(),
    };

    // Load snapshot
    let snapshot = if session_path.extension().is_some_and(|ext| ext == "json") {
        let json = fs::read_to_string(&session_path).unwrap_or_else(|e| {
            eprintln!("Error reading snapshot file: {}", e);
            std::process::exit(1);
        });
        persist::decode_snapshot(&json)
    } else {
        persist::load_snapshot(&session_path).unwrap_or_else(|e| {
            eprintln!("Error loading session: {}", e);
            std::process::exit(1);
        })
    };

    let mut editor = ImageEditor::new(EditorConfig::default()).unwrap_or_else(|e| {
        eprintln!("Error creating editor: {}", e);
        std::process::exit(1);
    });

    if !editor.restore_persistent_data(snapshot) {
        println!("No saved state in {}, showing a fresh session.", session_path.display());
        println!();
    }

    let present = editor.present();
    let (width, height) = present.dimensions();

    println!("Sprite Session");
    println!("==============");
    println!("Frames: {} ({}x{})", present.frame_count(), width, height);
    println!("Current frame: {}", present.current_frame_index());
    println!("Interval: {}ms", editor.interval());
    println!("Zoom: {}", present.zoom());
    println!("Undo depth: {}", editor.history().past().len());
    println!("Tool: {:?}", editor.editor_state().tool);
    println!();
    println!("{}", editor.all_frames_literal(format));
}

fn print_example_snapshot() {
    let mut editor = ImageEditor::new(EditorConfig::default()).unwrap_or_else(|e| {
        eprintln!("Error creating editor: {}", e);
        std::process::exit(1);
    });

    let result = example_frames().and_then(|frames| {
        editor.apply(Command::SetInitialFrames {
            frames,
            interval: 120,
        })?;
        editor.apply(Command::AddFrame)?;
        Ok(())
    });
    if let Err(e) = result {
        eprintln!("Error building example: {}", e);
        std::process::exit(1);
    }

    let snapshot: Snapshot = editor.persistent_data();

    println!("Example snapshot (session.json):");
    match persist::encode_snapshot(&snapshot) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error encoding snapshot: {}", e);
            std::process::exit(1);
        }
    }
}

fn example_frames() -> Result<Vec<Frame>, sprite_anim::EditorError> {
    let base = Bitmap::blank(4, 4)?;
    Ok(vec![
        Frame::new(base.with_pixel(1, 1, 2)?),
        Frame::new(base.with_pixel(2, 2, 2)?),
    ])
}

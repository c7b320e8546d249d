//! Lintel - CSS box layout demo
//!
//! Usage: lintel --demo [--width <PX>] [--dpi <DPI>]

use std::env;
use std::process::ExitCode;

use lintel_dom::{DomResult, DomTree, NodeId};
use lintel_layout::{layout_document, LayoutOptions, SimpleFontProvider};
use lintel_render::{build_display_list, DisplayList, PaintCommand, RenderBackend};
use lintel_style::{Color, StyleTree};

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() -> ExitCode {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage(&args[0]);
        return ExitCode::FAILURE;
    }

    match args[1].as_str() {
        "--help" | "-h" => {
            print_usage(&args[0]);
            ExitCode::SUCCESS
        }
        "--version" | "-V" => {
            println!("Lintel {}", VERSION);
            ExitCode::SUCCESS
        }
        "--demo" => {
            let result = parse_options(&args[2..]).and_then(|options| run_demo(&options));
            if let Err(e) = result {
                eprintln!("Error: {}", e);
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
        other => {
            eprintln!("Unknown command: {}", other);
            print_usage(&args[0]);
            ExitCode::FAILURE
        }
    }
}

fn print_usage(program: &str) {
    println!(
        r#"Lintel {} - CSS box layout engine

USAGE:
    {} --demo [OPTIONS]

OPTIONS:
    -h, --help        Print this help message
    -V, --version     Print version information
    --demo            Lay out a sample document and print the result
    --width <PX>      Viewport width (default 1024)
    --dpi <DPI>       Device resolution (default 96)

EXAMPLES:
    {} --demo
    {} --demo --width 480 --dpi 72
"#,
        VERSION, program, program, program
    );
}

/// Read `--width` and `--dpi` flags
fn parse_options(args: &[String]) -> Result<LayoutOptions, String> {
    let mut options = LayoutOptions::default();
    let mut iter = args.iter();
    while let Some(flag) = iter.next() {
        let value = |v: Option<&String>| -> Result<f64, String> {
            let v = v.ok_or_else(|| format!("{} needs a value", flag))?;
            match v.parse::<f64>() {
                Ok(n) if n > 0.0 => Ok(n),
                _ => Err(format!("invalid value for {}: {}", flag, v)),
            }
        };
        match flag.as_str() {
            "--width" => options.viewport_width = value(iter.next())?,
            "--dpi" => options.dpi = value(iter.next())?,
            other => return Err(format!("unknown option: {}", other)),
        }
    }
    Ok(options)
}

/// Lay out the sample document and print its box tree and display list
fn run_demo(options: &LayoutOptions) -> Result<(), String> {
    let dom = build_demo_document().map_err(|e| e.to_string())?;
    let styles = StyleTree::from_style_attributes(&dom);
    let fonts = SimpleFontProvider::new();

    log::info!(
        "laying out {} nodes at {} dpi, viewport {}",
        dom.len(),
        options.dpi,
        options.viewport_width
    );
    let tree = layout_document(&dom, &styles, &fonts, options).map_err(|e| e.to_string())?;

    println!("Box tree:");
    print!("{}", tree.pretty_print());

    let list = build_display_list(&tree, &styles);
    let height = tree.root_box().dimensions.margin_box_height().to_f32();
    let mut backend = TextBackend::new(options.viewport_width as u32, height as u32);
    backend.clear(Color::white());
    backend.render(&list);
    backend.present();
    Ok(())
}

fn styled(dom: &mut DomTree, parent: NodeId, tag: &str, style: &str) -> DomResult<NodeId> {
    let id = dom.append_element(parent, tag)?;
    if let Some(element) = dom.get_mut(id).and_then(|n| n.as_element_mut()) {
        element.set_attribute("style", style);
    }
    Ok(id)
}

fn build_demo_document() -> DomResult<DomTree> {
    let mut dom = DomTree::new();
    let html = dom.append_element(dom.document_id(), "html")?;
    let head = dom.append_element(html, "head")?;
    dom.append_element(head, "title")?;

    let body = styled(&mut dom, html, "body", "padding: 8px; background: white; color: #222")?;

    let heading = styled(&mut dom, body, "h1", "font-size: x-large; margin-bottom: 8px")?;
    dom.append_text(heading, "Lintel layout demo")?;

    let para = styled(&mut dom, body, "p", "line-height: 1.4")?;
    let aside = styled(&mut dom, para, "div", "float: left; width: 120px; padding: 4px; background: #eeeeee")?;
    dom.append_text(aside, "A floated sidebar")?;
    dom.append_text(
        para,
        "Text flows beside the float until it clears, then takes the full width of the paragraph. ",
    )?;
    let em = styled(&mut dom, para, "span", "color: red")?;
    dom.append_text(em, "Inline elements")?;
    dom.append_text(para, " continue the same line, and replaced content sits on the baseline ")?;
    let img = dom.create_replaced("img", 48.0, 32.0);
    dom.append_child(para, img)?;

    let centered = styled(
        &mut dom,
        body,
        "div",
        "width: 50%; margin: 12px auto 0 auto; text-align: center; background: #ddeeff",
    )?;
    dom.append_text(centered, "Centered block")?;

    let hidden = styled(&mut dom, body, "div", "display: none")?;
    dom.append_text(hidden, "never laid out")?;

    Ok(dom)
}

/// Backend that prints paint commands to stdout
struct TextBackend {
    width: u32,
    height: u32,
    frame: Vec<String>,
}

impl TextBackend {
    fn new(width: u32, height: u32) -> Self {
        Self { width, height, frame: Vec::new() }
    }
}

impl RenderBackend for TextBackend {
    fn clear(&mut self, color: Color) {
        self.frame.clear();
        self.frame.push(format!("clear {:?}", color));
    }

    fn render(&mut self, display_list: &DisplayList) {
        for command in &display_list.commands {
            let line = match command {
                PaintCommand::FillRect { rect, color } => format!(
                    "fill ({}, {}, {}, {}) rgba({}, {}, {}, {})",
                    rect.x, rect.y, rect.width, rect.height, color.r, color.g, color.b, color.a
                ),
                PaintCommand::DrawGlyphs { text, positions, .. } => match positions.first() {
                    Some((x, y)) => format!("glyphs {:?} at ({}, {})", text, x, y),
                    None => format!("glyphs {:?}", text),
                },
                PaintCommand::DrawBorder { rect, .. } => {
                    format!("border ({}, {}, {}, {})", rect.x, rect.y, rect.width, rect.height)
                }
                PaintCommand::DrawReplaced { node, rect } => {
                    format!("replaced {} ({}, {}, {}, {})", node, rect.x, rect.y, rect.width, rect.height)
                }
            };
            self.frame.push(line);
        }
    }

    fn present(&mut self) {
        println!("Display list ({}x{}):", self.width, self.height);
        for line in self.frame.drain(..) {
            println!("  {}", line);
        }
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }
}

//! gofmt-style alignment for emitted struct bodies.
//!
//! Consecutive field lines (`\t<ident> <type> <tag>`) are padded into three
//! columns, each one space wider than its widest cell. Everything else is
//! copied as is, so running the pass twice changes nothing.

pub fn align(src: &str) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut block: Vec<[&str; 3]> = Vec::new();

    for line in src.lines() {
        match split_field(line) {
            Some(cells) => block.push(cells),
            None => {
                flush(&mut block, &mut out);
                out.push(line.to_string());
            }
        }
    }
    flush(&mut block, &mut out);

    let mut text = out.join("\n");
    if src.ends_with('\n') {
        text.push('\n');
    }
    text
}

fn split_field(line: &str) -> Option<[&str; 3]> {
    let body = line.strip_prefix('\t')?;
    let (ident, rest) = body.split_once(' ')?;
    let (ty, tag) = rest.trim_start().split_once(' ')?;
    let tag = tag.trim_start();
    if ident.is_empty() || ty.is_empty() || !tag.starts_with('`') {
        return None;
    }
    Some([ident, ty, tag])
}

fn flush(block: &mut Vec<[&str; 3]>, out: &mut Vec<String>) {
    let ident_w = block.iter().map(|c| c[0].chars().count()).max().unwrap_or(0);
    let ty_w = block.iter().map(|c| c[1].chars().count()).max().unwrap_or(0);
    for [ident, ty, tag] in block.drain(..) {
        out.push(format!("\t{ident:<ident_w$} {ty:<ty_w$} {tag}"));
    }
}

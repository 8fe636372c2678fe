use colored::Colorize;
use projman::{FolderNode, TemplateStore};

pub const CMD_STR: &str = "tree";
pub const TEMPLATE_ARG: &str = "TEMPLATE";

pub fn tree(store: &TemplateStore, template_name: &str) -> projman::Result<()> {
    let template = store.load(template_name)?;
    println!("{}", template.name.bold());
    if template.root.is_empty() {
        println!("{}", "(no folders)".dimmed());
    } else {
        print!("{}", render(&template.root));
    }
    Ok(())
}

/// Draws the folders below `root` with box-drawing guides, one per line.
pub fn render(root: &FolderNode) -> String {
    fn draw(node: &FolderNode, prefix: &str, out: &mut String) {
        let count = node.children.len();
        for (i, child) in node.children.iter().enumerate() {
            let last = i + 1 == count;
            out.push_str(prefix);
            out.push_str(if last { "└── " } else { "├── " });
            out.push_str(&child.name);
            out.push('\n');
            let deeper = format!("{}{}", prefix, if last { "    " } else { "│   " });
            draw(child, &deeper, out);
        }
    }
    let mut out = String::new();
    draw(root, "", &mut out);
    out
}

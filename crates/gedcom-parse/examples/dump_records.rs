use std::io::Read;

use gedcom_parse::{Parser, Selector, Tokenizer};

fn main() {
    let mut source = String::new();
    std::io::stdin().read_to_string(&mut source).unwrap();

    println!("=== Lines ===");
    for line in Tokenizer::new(&source) {
        println!("{:?}", line);
    }

    println!("\n=== Records ===");
    let mut parser = Parser::new();
    parser
        .before(Selector::Any, |value, cx| {
            println!("{:indent$}open  {} {:?}", "", cx.tags().join("."), value, indent = cx.depth() * 2);
            Ok(())
        })
        .unwrap()
        .after(Selector::Any, |value, cx| {
            println!("{:indent$}close {} {:?}", "", cx.tags().join("."), value, indent = cx.depth() * 2);
            Ok(())
        })
        .unwrap();
    if let Err(e) = parser.parse_str(&source) {
        eprint!("{}", e.render("<stdin>", &source));
    }
}

#![no_main]

use jsontape::{Kind, Parser};
use libfuzzer_sys::fuzz_target;

// Parsing arbitrary bytes must never panic, and anything that parses must
// yield a structurally sound tape whose strings can all be materialized.
fuzz_target!(|data: &[u8]| {
    let mut parser = Parser::default();
    let Ok(doc) = parser.parse(data) else {
        return;
    };

    let count = doc.token_count();
    let mut scratch = Vec::new();

    for idx in 1..=count {
        // Parent chains terminate at the sentinel through containers only.
        let mut hops = 0u32;
        let mut ancestor = doc.token(idx).parent();
        while ancestor != 0 {
            assert!(matches!(
                doc.token(ancestor).kind(),
                Kind::Object | Kind::Array
            ));
            ancestor = doc.token(ancestor).parent();
            hops += 1;
            assert!(hops <= count);
        }

        let token = doc.token(idx);
        if token.is_container() {
            assert!(token.next() > idx);
            assert_eq!(doc.children(idx).count() as u32, token.children());
        }

        let _ = doc.name(idx, &mut scratch);
        scratch.clear();
        let _ = doc.string(idx, &mut scratch);
        scratch.clear();
    }
});

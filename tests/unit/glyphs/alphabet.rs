use super::*;

#[test]
fn alphabet_matches_letters_then_digits() {
    let a = SymbolAlphabet::default();
    assert_eq!(a.len(), 62);
    assert_eq!(a.symbol(0), Some('a'));
    assert_eq!(a.symbol(26), Some('A'));
    assert_eq!(a.symbol(52), Some('0'));
    assert_eq!(a.symbol(61), Some('9'));
    assert_eq!(a.symbol(62), None);
}

#[test]
fn spell_maps_ids_in_order() {
    let a = SymbolAlphabet::default();
    assert_eq!(a.spell(&[7, 4, 52]).as_deref(), Some("he0"));
    assert_eq!(a.spell(&[0, 99]), None);
}

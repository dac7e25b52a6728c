//! Hand-packed fixtures shared by the search unit tests.

use crate::dictionary::{Dictionary, DictionaryUnit, Guide, GuideUnit};

/// Automaton and guide for `{"ab" -> 7, "ac" -> 3}`.
///
/// Layout (bases chosen distinct so label checks stay sound):
///
/// ```text
/// unit 0: root, base 0x60            unit 4: unused
/// unit 1: label 'a', base 0x64       unit 5: unused
/// unit 2: value cell 7               unit 6: label 'b', base 2, HAS_LEAF
/// unit 3: value cell 3               unit 7: label 'c', base 3, HAS_LEAF
/// ```
pub(crate) fn tiny_fixture() -> (Dictionary<'static>, Guide<'static>) {
    let mut units = vec![DictionaryUnit::default(); 8];
    assert!(units[0].set_offset(0x60));
    units[1].set_label(b'a');
    assert!(units[1].set_offset(0x65));
    units[6].set_label(b'b');
    assert!(units[6].set_offset(4));
    units[6].set_has_leaf();
    units[7].set_label(b'c');
    assert!(units[7].set_offset(4));
    units[7].set_has_leaf();
    units[2].set_value(7);
    units[3].set_value(3);

    let mut guide_units = vec![GuideUnit::default(); 8];
    guide_units[0] = GuideUnit::new(b'a', 0);
    guide_units[1] = GuideUnit::new(b'b', 0);
    guide_units[6] = GuideUnit::new(0, b'c');
    guide_units[7] = GuideUnit::new(0, 0);

    (Dictionary::from_units(units), Guide::from_units(guide_units))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixture_answers_exact_lookups() {
        let (dict, _) = tiny_fixture();
        assert_eq!(dict.find(b"ab"), Some(7));
        assert_eq!(dict.find(b"ac"), Some(3));
        assert_eq!(dict.find(b"a"), None);
        assert_eq!(dict.find(b"ad"), None);
    }
}

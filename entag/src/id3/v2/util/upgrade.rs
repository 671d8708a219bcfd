// ID3v2.2 IDs that have an ID3v2.3 counterpart
const V2_UPGRADES: [(&str, &str); 8] = [
	("TT2", "TIT2"),
	("TAL", "TALB"),
	("TP1", "TPE1"),
	("TRK", "TRCK"),
	("TYE", "TYER"),
	("COM", "COMM"),
	("TCO", "TCON"),
	("PIC", "APIC"),
];

/// Upgrade an ID3v2.2 frame ID
///
/// IDs without a mapping stay as they are.
pub(crate) fn upgrade_v2(id: &str) -> Option<&'static str> {
	V2_UPGRADES
		.iter()
		.find(|(v2, _)| *v2 == id)
		.map(|(_, v3)| *v3)
}

//! The English (en-US) language handler.

use indexmap::IndexMap;

use crate::handlers::LanguageHandler;
use crate::pronouns::{CaseTable, PairValue, PronounSet, PronounSetTable};
use crate::tags::GenderTagMatch;
use crate::tokens::format_number;

/// Locale rules and built-in pronoun sets for the game's en-US string tables.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnglishHandler;

impl EnglishHandler {
    pub const THEY_THEM_SET_ID: &'static str = "4CAA6EA8-3D59-4F6B-8842-ABB7F5A5AC27";
    pub const ZE_ZIR_SET_ID: &'static str = "A5149C53-6B7E-4E26-AA6E-A38DD8AC8743";
    pub const ZE_HIR_SET_ID: &'static str = "FB11090A-EC13-4437-832C-B0E0C78B89F9";
    pub const XE_XEM_SET_ID: &'static str = "055ECB20-EFD0-477A-91EC-927C947F7E60";
    pub const EY_EM_SET_ID: &'static str = "34B839A1-0ADC-42A8-A2E7-6161D6804945";
    pub const IT_SET_ID: &'static str = "2C7EC16C-D1BB-496A-987A-D3D95981FB48";

    /// en-US string table instances have this hex id prefix.
    const STBL_INSTANCE_PREFIX: &'static str = "00";
}

/// Non-pronoun replacements shared by every built-in set.
const COMMON_PAIRS: &[(&str, &str)] = &[
    ("ms.|mr.", "mx."),
    ("girlfriend|boyfriend", "partner"),
    ("sister|brother", "sibling"),
    ("mother|father", "parent"),
    ("grandmother|grandfather", "grandparent"),
    ("granddaughter|grandson", "grandchild"),
    ("wife|husband", "partner"),
    ("daughter|son", "child"),
    ("step-daughter|step-son", "step-child"),
    ("step-mother|step-father", "step-parent"),
    ("stepsister|stepbrother", "step-sibling"),
    ("great-granddaughter|great-grandson", "great-grandchild"),
    ("great-grandmother|great-grandfather", "great-grandparent"),
    ("half-sister|half-brother", "half-sibling"),
];

fn build_set(title: &str, pronoun_pairs: &[(&str, PairValue)]) -> PronounSet {
    let mut pairs: IndexMap<String, PairValue> = IndexMap::new();

    for (key, value) in pronoun_pairs {
        pairs.insert((*key).to_owned(), value.clone());
    }

    for (key, value) in COMMON_PAIRS {
        pairs.insert((*key).to_owned(), PairValue::Literal((*value).to_owned()));
    }

    PronounSet {
        title: title.to_owned(),
        pairs,
    }
}

fn literal(text: &str) -> PairValue {
    PairValue::Literal(text.to_owned())
}

/// "She's/He's" expands to "they're" in some strings and "they've" in others, so the
/// They / Them set carries per-string cases for it instead of a single literal. The
/// table covers every affected string across the base game and its packs.
fn they_them_contraction_cases() -> PairValue {
    const RE: Option<&str> = Some("they’re");
    const VE: Option<&str> = Some("they’ve");

    let entries: &[(u32, &[Option<&str>])] = &[
        (3848466204, &[RE]),
        (3315035175, &[RE]),
        (1624609554, &[RE]),
        (4227368516, &[RE]),
        (3466820587, &[RE]),
        (2288915427, &[RE]),
        (3169408581, &[RE]),
        (2678019203, &[VE]),
        (3330177454, &[VE, VE]),
        (1827704107, &[RE]),
        (2578737338, &[VE]),
        (3492028680, &[RE]),
        (1333238331, &[VE]),
        (515967586, &[VE, VE]),
        (3561336254, &[RE]),
        (3704738005, &[RE]),
        (465738403, &[RE]),
        (3226398757, &[RE]),
        (3141825038, &[VE]),
        (2104253335, &[RE]),
        (3228515647, &[RE]),
        (755536319, &[RE]),
        (218063767, &[RE]),
        (2381004192, &[VE]),
        (526003011, &[RE]),
        (260030352, &[RE]),
        (1570293922, &[RE]),
        (425395394, &[RE]),
        (2162386291, &[VE]),
        (2657241850, &[RE]),
        (2899699152, &[RE, VE]),
        (274559984, &[RE]),
        (2192147899, &[VE]),
        (281927073, &[RE]),
        (1637670727, &[VE]),
        (4276505725, &[VE]),
        (1519601547, &[RE]),
        (3556521145, &[VE]),
        (229207012, &[RE, RE]),
        (1378797210, &[RE]),
        (1945427369, &[VE, RE]),
        (762148562, &[RE]),
        (490246009, &[RE]),
        (2195308598, &[RE]),
        (1787343902, &[RE, VE]),
        (4181546333, &[RE]),
        (3170322154, &[RE]),
        (146307187, &[VE]),
        (2828163811, &[RE]),
        (527186830, &[RE]),
        (879197290, &[RE]),
        (1308055271, &[RE]),
        (326337872, &[RE]),
        (1446312658, &[VE]),
        (3471668398, &[RE]),
        (421326762, &[RE]),
        (1882135755, &[RE]),
        (530741329, &[VE]),
        (642195893, &[RE]),
        (765309846, &[VE]),
        (689897592, &[VE]),
        (381123135, &[VE]),
        (3036917095, &[VE]),
        (3616413496, &[RE]),
        (2635592640, &[VE]),
        (1638234967, &[RE]),
        (256767393, &[RE]),
        (1409130717, &[RE, VE]),
        (1143457402, &[VE]),
        (3914469433, &[RE]),
        (3381386026, &[RE]),
        (482107880, &[VE]),
        (3570446735, &[RE]),
        (2308263534, &[RE]),
        (2606364627, &[RE]),
        (2704319052, &[VE]),
        (528741600, &[RE]),
        (884298658, &[RE]),
        (3433334323, &[RE]),
        (2032866090, &[RE]),
        (1304979815, &[VE]),
        (3046188260, &[RE, RE]),
        (2135613228, &[RE]),
        (2067337094, &[RE]),
        (3657472333, &[RE]),
        (900908594, &[VE]),
        (2525873244, &[RE]),
        (2799360804, &[RE]),
        (2229212067, &[RE]),
        (1450177386, &[VE]),
        (1042303010, &[RE]),
        (1333533282, &[VE]),
        (2824793300, &[RE]),
        (576298777, &[RE]),
        (202995658, &[VE]),
        (2914066380, &[RE]),
        (3463186294, &[VE]),
        (2353379673, &[RE]),
        (1949298448, &[RE]),
        (2908419715, &[RE]),
        (2730851378, &[RE]),
        (53049609, &[RE]),
        (1879120390, &[VE]),
        (3960410444, &[RE]),
        (1048614018, &[RE]),
        (2272745476, &[RE]),
        (327268175, &[VE]),
        (2861103239, &[RE]),
        (1259997717, &[RE]),
        (1248988049, &[VE]),
        (524550395, &[RE]),
        (2146515970, &[VE]),
        (2432123903, &[VE, RE]),
        (1527763005, &[RE]),
        (388163329, &[RE, RE]),
        (3560232075, &[RE]),
        (3398058508, &[RE]),
        (793974509, &[VE]),
        (4255087623, &[RE]),
        (1662158783, &[RE]),
        (854349599, &[RE]),
        (3541862656, &[RE]),
        (1474885875, &[VE, RE]),
        (1220195416, &[VE]),
        (3803402225, &[RE]),
        (467930270, &[RE, RE, VE]),
        (3425777175, &[RE, VE]),
        (4051813452, &[RE]),
        (2837713442, &[RE]),
        (2915358164, &[VE, RE]),
        (1388826329, &[RE]),
        (1989470220, &[VE]),
        (1692166899, &[RE]),
        (1829982328, &[RE]),
        (2399145537, &[RE]),
        (1021820828, &[RE]),
        (3813596509, &[RE]),
        (1776187394, &[RE]),
        (1063470410, &[RE]),
        (2722379016, &[RE]),
        (455203967, &[RE]),
        (3349965145, &[RE]),
        (979735164, &[RE]),
        (3272738715, &[RE]),
        (2941426802, &[RE]),
        (2709371049, &[RE]),
        (1106539124, &[RE]),
        (518024581, &[RE]),
        (256472513, &[RE]),
        (741211455, &[RE]),
        (2385622025, &[RE]),
        (383194337, &[RE]),
        (279240105, &[RE]),
        (2500858723, &[VE]),
        (357674073, &[RE]),
        (3304244932, &[RE]),
        (3463122932, &[RE]),
        (25995852, &[RE]),
        (78585291, &[RE]),
        (1126985834, &[RE]),
        (1823306900, &[VE]),
        (1088216950, &[RE]),
        (1412561533, &[VE]),
        (1037909830, &[RE]),
        (3577957337, &[RE]),
        (2115736118, &[RE]),
        (223668276, &[RE]),
        (2873568945, &[RE]),
        (4005536516, &[VE]),
        (4289836499, &[VE, None, RE]),
        (1269785600, &[RE]),
        (4013355759, &[RE, VE]),
        (3216902865, &[VE]),
        (1669566961, &[VE, VE]),
        (60213487, &[None, None, RE]),
        (1906335606, &[RE, RE]),
        (1627066167, &[VE]),
        (1282045627, &[RE]),
        (3665016674, &[VE]),
        (173055719, &[None]),
        (1648700187, &[RE, VE, VE]),
        (299471275, &[RE, VE, VE, VE]),
        (746070453, &[RE, VE, VE]),
        (3257836685, &[RE, VE]),
        (2404242656, &[RE, VE]),
        (570100257, &[RE]),
        (2742046835, &[RE, RE]),
        (3633050323, &[VE]),
        (3683304988, &[RE]),
        (4083831262, &[RE]),
        (2566275947, &[RE]),
        (132224273, &[RE]),
        (1022143122, &[RE]),
        (4239362667, &[RE]),
        (155977711, &[RE]),
        (731208129, &[RE]),
        (2165543469, &[RE]),
        (3812823502, &[RE]),
        (2091981419, &[RE]),
        (122260999, &[RE]),
        (4190474701, &[RE]),
        (3072030183, &[RE]),
        (1421972396, &[RE]),
        (2321907389, &[RE]),
        (1026766317, &[VE]),
        (4141109267, &[RE]),
        (829066520, &[RE]),
        (1655784957, &[VE]),
        (4124333197, &[RE]),
        (4167129096, &[RE]),
        (1621259442, &[RE]),
        (2657358867, &[RE]),
        (1677419905, &[RE, VE]),
        (1633334723, &[RE]),
        (1597935695, &[RE]),
        (2078949162, &[RE]),
        (3052483502, &[RE]),
        (581190033, &[RE, RE, RE]),
        (1190606639, &[RE]),
        (4124192543, &[RE]),
        (2129713926, &[RE]),
        (774846671, &[RE]),
        (1030449092, &[RE]),
        (106949386, &[RE]),
        (1145245963, &[VE]),
        (2043703112, &[VE]),
        (639201188, &[VE]),
        (3465508511, &[VE]),
        (1617138310, &[VE]),
        (819621328, &[RE]),
        (2434216330, &[RE]),
        (2096424560, &[RE]),
        (2170973686, &[VE]),
        (3637497501, &[RE]),
    ];

    let cases = entries
        .iter()
        .map(|(key, texts)| {
            let texts = texts.iter().map(|text| text.map(str::to_owned)).collect();
            (*key, texts)
        })
        .collect();

    PairValue::Cases(CaseTable {
        default: None,
        cases,
    })
}

fn they_them_set() -> PronounSet {
    build_set(
        "They / Them",
        &[
            ("she|he", literal("they")),
            ("her|him", literal("them")),
            ("her|his", literal("their")),
            ("hers|his", literal("theirs")),
            ("she’s|he’s", they_them_contraction_cases()),
            ("she’ll|he’ll", literal("they’ll")),
            ("she’d|he’d", literal("they’d")),
            ("herself|himself", literal("themself")),
        ],
    )
}

fn ze_zir_set() -> PronounSet {
    build_set(
        "Ze / Zir",
        &[
            ("she|he", literal("ze")),
            ("her|him", literal("zir")),
            ("her|his", literal("zir")),
            ("hers|his", literal("zirs")),
            ("she’s|he’s", literal("ze’s")),
            ("she’ll|he’ll", literal("ze’ll")),
            ("she’d|he’d", literal("ze’d")),
            ("herself|himself", literal("zirself")),
        ],
    )
}

fn ze_hir_set() -> PronounSet {
    build_set(
        "Ze / Hir",
        &[
            ("she|he", literal("ze")),
            ("her|him", literal("hir")),
            ("her|his", literal("hir")),
            ("hers|his", literal("hirs")),
            ("she’s|he’s", literal("ze’s")),
            ("she’ll|he’ll", literal("ze’ll")),
            ("she’d|he’d", literal("ze’d")),
            ("herself|himself", literal("hirself")),
        ],
    )
}

fn xe_xem_set() -> PronounSet {
    build_set(
        "Xe / Xem",
        &[
            ("she|he", literal("xe")),
            ("her|him", literal("xem")),
            ("her|his", literal("xyr")),
            ("hers|his", literal("xyrs")),
            ("she’s|he’s", literal("xe’s")),
            ("she’ll|he’ll", literal("xe’ll")),
            ("she’d|he’d", literal("xe’d")),
            ("herself|himself", literal("xyrself")),
        ],
    )
}

fn ey_em_set() -> PronounSet {
    build_set(
        "Ey / Em",
        &[
            ("she|he", literal("ey")),
            ("her|him", literal("em")),
            ("her|his", literal("eir")),
            ("hers|his", literal("eirs")),
            ("she’s|he’s", literal("ey’s")),
            ("she’ll|he’ll", literal("ey’ll")),
            ("she’d|he’d", literal("ey’d")),
            ("herself|himself", literal("emself")),
        ],
    )
}

fn it_set() -> PronounSet {
    build_set(
        "It",
        &[
            ("she|he", literal("it")),
            ("her|him", literal("it")),
            ("her|his", literal("its")),
            ("hers|his", literal("its")),
            ("she’s|he’s", literal("it’s")),
            ("she’ll|he’ll", literal("it’ll")),
            ("she’d|he’d", literal("it’d")),
            ("herself|himself", literal("itself")),
        ],
    )
}

impl LanguageHandler for EnglishHandler {
    fn language_code(&self) -> &'static str {
        "en-us"
    }

    fn tag_text_identifier_part(&self, tag_text: &str) -> String {
        let standardized = tag_text.to_lowercase();
        let standardized = standardized.trim_matches(' ');

        // Standardize apostrophe characters, and the game's inconsistent "mr"/"ms" tags
        // where some carry trailing dots and some don't.
        match standardized {
            "she's" => "she’s".to_owned(),
            "he's" => "he’s".to_owned(),
            "she'll" => "she’ll".to_owned(),
            "he'll" => "he’ll".to_owned(),
            "she'd" => "she’d".to_owned(),
            "he'd" => "he’d".to_owned(),
            "mr" => "mr.".to_owned(),
            "ms" => "ms.".to_owned(),
            other => other.to_owned(),
        }
    }

    fn fix_tag_usage_inconsistency(&self, text: &str, matches: &[GenderTagMatch]) -> String {
        let mut fixed = String::with_capacity(text.len());
        let mut cursor = 0usize;

        let is_girl_boy = |tag_text: &str| {
            let lower = tag_text.to_lowercase();
            lower == "girl" || lower == "boy"
        };

        for tag_match in matches {
            // "Girlfriend"/"Boyfriend" sometimes appears as {F0.Girl}{M0.Boy}friend; pull
            // the shared suffix into both tags so the pair resolves as one word.
            let suffix: String = text[tag_match.end..].chars().take(6).collect();

            if is_girl_boy(&tag_match.first_text)
                && is_girl_boy(&tag_match.second_text)
                && suffix.eq_ignore_ascii_case("friend")
            {
                fixed.push_str(&text[cursor..tag_match.start]);
                fixed.push_str(&format!(
                    "{{{}{}.{}{}}}{{{}{}.{}{}}}",
                    tag_match.first_gender.marker(),
                    tag_match.first_token_index,
                    tag_match.first_text,
                    suffix,
                    tag_match.second_gender.marker(),
                    tag_match.second_token_index,
                    tag_match.second_text,
                    suffix,
                ));
                cursor = tag_match.end + suffix.len();
            } else {
                fixed.push_str(&text[cursor..tag_match.end]);
                cursor = tag_match.end;
            }
        }

        fixed.push_str(&text[cursor..]);
        fixed
    }

    fn standard_pronoun_sets(&self) -> PronounSetTable {
        let mut sets = PronounSetTable::new();

        sets.insert(Self::THEY_THEM_SET_ID.to_owned(), they_them_set());
        sets.insert(Self::ZE_ZIR_SET_ID.to_owned(), ze_zir_set());
        sets.insert(Self::ZE_HIR_SET_ID.to_owned(), ze_hir_set());
        sets.insert(Self::XE_XEM_SET_ID.to_owned(), xe_xem_set());
        sets.insert(Self::EY_EM_SET_ID.to_owned(), ey_em_set());
        sets.insert(Self::IT_SET_ID.to_owned(), it_set());

        sets
    }

    fn reserved_set_ids(&self) -> Vec<&'static str> {
        vec![
            Self::THEY_THEM_SET_ID,
            Self::ZE_ZIR_SET_ID,
            Self::ZE_HIR_SET_ID,
            Self::XE_XEM_SET_ID,
            Self::EY_EM_SET_ID,
            Self::IT_SET_ID,
        ]
    }

    fn handles_stbl_instance(&self, instance_hex_id: &str) -> bool {
        instance_hex_id.starts_with(Self::STBL_INSTANCE_PREFIX)
    }

    fn sim_full_name(&self, first_name: &str, last_name: &str) -> String {
        if last_name.trim().is_empty() {
            first_name.to_owned()
        } else {
            format!("{first_name} {last_name}")
        }
    }

    fn money_string(&self, amount: f64) -> String {
        format!("§{}", format_number(amount))
    }
}

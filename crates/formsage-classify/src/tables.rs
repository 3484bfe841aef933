//! Fixed option lists used by the built-in cascade.
//!
//! Kept apart from the matching logic so a list can grow without touching
//! the cascade order.

/// Thai name prefixes (honorifics).
pub const NAME_PREFIXES: &[&str] = &["นาย", "นาง", "นางสาว", "เด็กชาย", "เด็กหญิง"];

/// All 77 Thai provinces, Bangkok first, then Thai alphabetical order.
pub const PROVINCES: &[&str] = &[
    "กรุงเทพมหานคร", "กระบี่", "กาญจนบุรี", "กาฬสินธุ์", "กำแพงเพชร", "ขอนแก่น",
    "จันทบุรี", "ฉะเชิงเทรา", "ชลบุรี", "ชัยนาท", "ชัยภูมิ", "ชุมพร",
    "เชียงราย", "เชียงใหม่", "ตรัง", "ตราด", "ตาก", "นครนายก",
    "นครปฐม", "นครพนม", "นครราชสีมา", "นครศรีธรรมราช", "นครสวรรค์", "นนทบุรี",
    "นราธิวาส", "น่าน", "บึงกาฬ", "บุรีรัมย์", "ปทุมธานี", "ประจวบคีรีขันธ์",
    "ปราจีนบุรี", "ปัตตานี", "พระนครศรีอยุธยา", "พะเยา", "พังงา", "พัทลุง",
    "พิจิตร", "พิษณุโลก", "เพชรบุรี", "เพชรบูรณ์", "แพร่", "ภูเก็ต",
    "มหาสารคาม", "มุกดาหาร", "แม่ฮ่องสอน", "ยโสธร", "ยะลา", "ร้อยเอ็ด",
    "ระนอง", "ระยอง", "ราชบุรี", "ลพบุรี", "ลำปาง", "ลำพูน",
    "เลย", "ศรีสะเกษ", "สกลนคร", "สงขลา", "สตูล", "สมุทรปราการ",
    "สมุทรสงคราม", "สมุทรสาคร", "สระแก้ว", "สระบุรี", "สิงห์บุรี", "สุโขทัย",
    "สุพรรณบุรี", "สุราษฎร์ธานี", "สุรินทร์", "หนองคาย", "หนองบัวลำภู", "อ่างทอง",
    "อำนาจเจริญ", "อุดรธานี", "อุตรดิตถ์", "อุทัยธานี", "อุบลราชธานี",
];

/// Days of the week, Sunday first.
pub const WEEKDAYS: &[&str] = &[
    "อาทิตย์", "จันทร์", "อังคาร", "พุธ", "พฤหัสบดี", "ศุกร์", "เสาร์",
];

/// The twelve-year animal cycle, starting with the Rat.
pub const ZODIAC_SIGNS: &[&str] = &[
    "ชวด", "ฉลู", "ขาล", "เถาะ", "มะโรง", "มะเส็ง", "มะเมีย", "มะแม", "วอก", "ระกา", "จอ", "กุน",
];

/// Thai lunar months.
pub const LUNAR_MONTHS: &[&str] = &[
    "เดือนอ้าย", "เดือนยี่", "เดือนสาม", "เดือนสี่", "เดือนห้า", "เดือนหก",
    "เดือนเจ็ด", "เดือนแปด", "เดือนเก้า", "เดือนสิบ", "เดือนสิบเอ็ด", "เดือนสิบสอง",
];

/// Entity prefixes recognised on placeholder keys.
pub const ENTITY_PREFIXES: &[(&str, formsage_rules::Entity)] = &[
    ("m_", formsage_rules::Entity::Mother),
    ("f_", formsage_rules::Entity::Father),
    ("b_", formsage_rules::Entity::Informant),
    ("r_", formsage_rules::Entity::Registrar),
];

/// Unprefixed keys that belong to the child on birth-registration forms.
pub const CHILD_FIELDS: &[&str] = &[
    "name", "surname", "first_name", "last_name", "prefix", "gender", "sex",
    "dob", "birth_date", "birth_time", "birth_day", "birth_weekday", "birth_place",
    "place_of_birth", "child_no", "nationality", "weight", "id_number",
];

/// Leading tokens that belong to a known pattern and must not become ad-hoc groups.
pub const KNOWN_PATTERN_PREFIXES: &[&str] = &[
    "m", "f", "b", "r", "4d", "id", "sub", "first", "last", "maiden", "birth", "house",
    "place", "child", "lunar", "name", "registration", "reg", "day", "date", "time", "age",
    "province", "district", "subdistrict", "country", "address", "addr", "zodiac", "officer",
];

use itertools::Itertools;

/// Sentinel returned when the charger type is missing or matches nothing.
pub const NO_VEHICLE_INFO: &str = "정보 없음";

/// Charger-type codes of the public dataset paired with the vehicle text
/// shown for them. Matching is substring containment, so a composite value
/// such as `DC차데모+DC콤보` matches its component tokens and the composite
/// token itself. Order here only fixes iteration; output order comes from
/// sorting the matched set.
const CHARGER_VEHICLES: &[(&str, &str)] = &[
    ("DC차데모", "닛산 리프, 기아 레이EV, 기아 쏘울EV"),
    ("AC완속", "완속 충전을 지원하는 모든 전기차"),
    ("DC차데모+AC3상", "급속 복합규격(차데모·AC3상) 차량"),
    ("DC콤보", "현대 아이오닉5, 기아 EV6, 쉐보레 볼트EV, BMW i3"),
    ("DC차데모+DC콤보", "급속 복합규격(차데모·콤보) 차량"),
    ("DC차데모+AC3상+DC콤보", "모든 급속 충전 차량"),
    ("AC3상", "르노삼성 SM3 Z.E."),
];

/// Compatible-vehicle text for one charger-type value.
///
/// Total function with no failure mode: `None`, an empty value, or an
/// unrecognized code all yield [`NO_VEHICLE_INFO`]. Matches are collected
/// as a set, deduplicated, sorted, and comma-joined, so the result is
/// deterministic regardless of mapping order.
pub fn vehicles_for(charger_type: Option<&str>) -> String {
    let Some(value) = charger_type else {
        return NO_VEHICLE_INFO.to_string();
    };
    let matched = CHARGER_VEHICLES
        .iter()
        .filter(|(token, _)| value.contains(token))
        .map(|(_, description)| *description)
        .collect::<Vec<_>>();
    if matched.is_empty() {
        return NO_VEHICLE_INFO.to_string();
    }
    matched.into_iter().unique().sorted().join(", ")
}

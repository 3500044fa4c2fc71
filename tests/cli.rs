//! End-to-end coverage of every subcommand through the compiled binary.

mod common;

use std::fs;

use assert_cmd::Command;
use common::{TestWorkspace, fixture_path};
use encoding_rs::EUC_KR;
use predicates::str::contains;

fn fixture_arg(name: &str) -> String {
    fixture_path(name).to_str().expect("utf-8 path").to_string()
}

#[test]
fn clean_writes_validated_csv_to_file() {
    let workspace = TestWorkspace::new();
    let output = workspace.path().join("cleaned.csv");

    Command::cargo_bin("ev-stations")
        .expect("binary exists")
        .args([
            "clean",
            "-i",
            &fixture_arg("chargers_gangnam.csv"),
            "-i",
            &fixture_arg("chargers_busan.csv"),
            "-o",
            output.to_str().unwrap(),
        ])
        .assert()
        .success();

    let cleaned = fs::read_to_string(&output).expect("read cleaned output");
    let mut lines = cleaned.lines();
    let header = lines.next().expect("header line");
    assert!(header.contains("\"station_name\""));
    assert!(header.contains("\"province\""));
    assert_eq!(cleaned.lines().count(), 7, "header plus six kept rows");
    assert!(cleaned.contains("해운대해변주차장"));
    assert!(cleaned.contains("\"37.4979\",\"127.0276\""));
    assert!(
        !cleaned.contains("좌표미상분식"),
        "row without coordinates must be dropped"
    );
    assert!(
        !cleaned.contains("남항대교전망대"),
        "row outside the bounding box must be dropped"
    );
}

#[test]
fn clean_reads_stdin_and_renders_table() {
    let data = fs::read_to_string(fixture_path("chargers_gangnam.csv")).expect("read fixture");

    let assert = Command::cargo_bin("ev-stations")
        .expect("binary exists")
        .args(["clean", "-i", "-", "--format", "table"])
        .write_stdin(data)
        .assert()
        .success();

    let out = String::from_utf8(assert.get_output().stdout.clone()).expect("utf-8 stdout");
    assert!(out.contains("station_name"));
    assert!(out.contains("강남역환승센터"));
    assert!(
        out.lines().count() >= 6,
        "expected header, separator, and four data rows"
    );
}

#[test]
fn clean_emits_json_with_limit() {
    let assert = Command::cargo_bin("ev-stations")
        .expect("binary exists")
        .args([
            "clean",
            "-i",
            &fixture_arg("chargers_gangnam.csv"),
            "--format",
            "json",
            "--limit",
            "2",
        ])
        .assert()
        .success();

    let records: serde_json::Value =
        serde_json::from_slice(&assert.get_output().stdout).expect("parse JSON output");
    let records = records.as_array().expect("JSON array");
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["station_name"], "강남역환승센터");
    assert_eq!(records[0]["province"], "서울특별시");
    assert_eq!(records[0]["district"], "강남구");
    assert_eq!(records[0]["latitude"], 37.4979);
}

#[test]
fn provinces_lists_counts_in_sorted_order() {
    let assert = Command::cargo_bin("ev-stations")
        .expect("binary exists")
        .args([
            "provinces",
            "-i",
            &fixture_arg("chargers_gangnam.csv"),
            "-i",
            &fixture_arg("chargers_busan.csv"),
            "--counts",
        ])
        .assert()
        .success();

    let out = String::from_utf8(assert.get_output().stdout.clone()).expect("utf-8 stdout");
    assert!(out.contains("\"부산광역시\",\"2\""));
    assert!(out.contains("\"서울특별시\",\"4\""));
    let busan = out.find("부산광역시").expect("busan present");
    let seoul = out.find("서울특별시").expect("seoul present");
    assert!(busan < seoul, "provinces must sort lexicographically");
}

#[test]
fn districts_lists_only_the_requested_province() {
    let assert = Command::cargo_bin("ev-stations")
        .expect("binary exists")
        .args([
            "districts",
            "-i",
            &fixture_arg("chargers_gangnam.csv"),
            "-i",
            &fixture_arg("chargers_busan.csv"),
            "--province",
            "서울특별시",
        ])
        .assert()
        .success();

    let out = String::from_utf8(assert.get_output().stdout.clone()).expect("utf-8 stdout");
    assert!(out.contains("강남구"));
    assert!(out.contains("송파구"));
    assert!(!out.contains("해운대구"), "busan districts must not leak in");
    let gangnam = out.find("강남구").expect("gangnam present");
    let songpa = out.find("송파구").expect("songpa present");
    assert!(gangnam < songpa, "districts must sort lexicographically");
}

#[test]
fn filter_selects_one_district_as_json() {
    let assert = Command::cargo_bin("ev-stations")
        .expect("binary exists")
        .args([
            "filter",
            "-i",
            &fixture_arg("chargers_gangnam.csv"),
            "-i",
            &fixture_arg("chargers_busan.csv"),
            "--province",
            "서울특별시",
            "--district",
            "송파구",
            "--format",
            "json",
        ])
        .assert()
        .success();

    let records: serde_json::Value =
        serde_json::from_slice(&assert.get_output().stdout).expect("parse JSON output");
    let records = records.as_array().expect("JSON array");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["station_name"], "송파나루공원");
    assert_eq!(records[0]["district"], "송파구");
}

#[test]
fn summarize_merges_rows_at_identical_coordinates() {
    let assert = Command::cargo_bin("ev-stations")
        .expect("binary exists")
        .args(["summarize", "-i", &fixture_arg("chargers_gangnam.csv")])
        .assert()
        .success();

    let out = String::from_utf8(assert.get_output().stdout.clone()).expect("utf-8 stdout");
    assert_eq!(out.lines().count(), 4, "header plus three station rows");
    assert!(
        out.contains("\"AC완속,DC콤보\""),
        "charger types merge into a sorted comma-joined set"
    );
    assert!(out.contains("\"강남역환승센터\""));
    let merged_line = out
        .lines()
        .find(|line| line.contains("강남역환승센터"))
        .expect("merged station row");
    assert!(merged_line.ends_with("\"2\""), "two chargers at one station");
}

#[test]
fn summarize_emits_json_with_charger_counts() {
    let assert = Command::cargo_bin("ev-stations")
        .expect("binary exists")
        .args([
            "summarize",
            "-i",
            &fixture_arg("chargers_gangnam.csv"),
            "--format",
            "json",
        ])
        .assert()
        .success();

    let summaries: serde_json::Value =
        serde_json::from_slice(&assert.get_output().stdout).expect("parse JSON output");
    let summaries = summaries.as_array().expect("JSON array");
    assert_eq!(summaries.len(), 3);
    assert_eq!(summaries[0]["station_name"], "강남역환승센터");
    assert_eq!(summaries[0]["charger_type"], "AC완속,DC콤보");
    assert_eq!(summaries[0]["charger_count"], 2);
    assert!(
        summaries[0].get("province").is_none(),
        "summary rows carry no region columns"
    );
    assert_eq!(summaries[1]["charger_count"], 1);
}

#[test]
fn vehicles_prints_compatibility_text() {
    Command::cargo_bin("ev-stations")
        .expect("binary exists")
        .args(["vehicles", "AC완속"])
        .assert()
        .success()
        .stdout("완속 충전을 지원하는 모든 전기차\n");
}

#[test]
fn vehicles_prints_sentinel_for_unknown_type() {
    Command::cargo_bin("ev-stations")
        .expect("binary exists")
        .args(["vehicles", "수소충전"])
        .assert()
        .success()
        .stdout("정보 없음\n");
}

#[test]
fn euc_kr_sources_load_with_encoding_flag() {
    let text = "충전소명,주소,위도경도,충전기타입,시설구분(대),시설구분(소)\n\
                제주공항주차장,제주특별자치도 제주시 공항로 2,\"33.5104,126.4914\",DC콤보,교통시설,주차장\n";
    let (encoded, _, _) = EUC_KR.encode(text);

    let workspace = TestWorkspace::new();
    let path = workspace.write_bytes("jeju-euckr.csv", &encoded);

    let assert = Command::cargo_bin("ev-stations")
        .expect("binary exists")
        .args([
            "clean",
            "-i",
            path.to_str().unwrap(),
            "--input-encoding",
            "euc-kr",
        ])
        .assert()
        .success();

    let out = String::from_utf8(assert.get_output().stdout.clone()).expect("utf-8 stdout");
    assert!(out.contains("제주공항주차장"));
    assert!(out.contains("\"제주특별자치도\""));
}

#[test]
fn missing_column_fails_naming_the_source() {
    let workspace = TestWorkspace::new();
    let path = workspace.write(
        "no-coords.csv",
        "충전소명,주소,충전기타입,시설구분(대),시설구분(소)\n\
         어딘가충전소,서울특별시 강남구 테헤란로 1,AC완속,근린시설,주차장\n",
    );

    Command::cargo_bin("ev-stations")
        .expect("binary exists")
        .args(["clean", "-i", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(contains("missing required column"))
        .stderr(contains("no-coords.csv"));
}

#[test]
fn mixed_header_sources_fail_naming_both_sources() {
    let workspace = TestWorkspace::new();
    let korean = workspace.write(
        "korean.csv",
        "충전소명,주소,위도경도,충전기타입,시설구분(대),시설구분(소)\n\
         서울충전소,서울특별시 중구 세종대로 110,\"37.56,126.97\",AC완속,공공시설,주차장\n",
    );
    let english = workspace.write(
        "english.csv",
        "station_name,address,lat_lon,charger_type,facility_major,facility_minor\n\
         Seoul Hub,Seoul Jung-gu Sejong-daero 110,\"37.56,126.97\",AC완속,public,parking\n",
    );

    Command::cargo_bin("ev-stations")
        .expect("binary exists")
        .args([
            "provinces",
            "-i",
            korean.to_str().unwrap(),
            "-i",
            english.to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(contains("does not match baseline"))
        .stderr(contains("korean.csv"));
}

#[test]
fn unknown_encoding_label_fails() {
    Command::cargo_bin("ev-stations")
        .expect("binary exists")
        .args([
            "clean",
            "-i",
            &fixture_arg("chargers_gangnam.csv"),
            "--input-encoding",
            "klingon",
        ])
        .assert()
        .failure()
        .stderr(contains("Unknown encoding 'klingon'"));
}

#[test]
fn unreadable_source_fails_with_context() {
    Command::cargo_bin("ev-stations")
        .expect("binary exists")
        .args(["clean", "-i", "/definitely/not/here/chargers.csv"])
        .assert()
        .failure()
        .stderr(contains("could not be read"))
        .stderr(contains("/definitely/not/here/chargers.csv"));
}

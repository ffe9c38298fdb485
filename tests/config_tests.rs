//! Config loader tests

use intersection_sim::simulation::SimConfig;

fn sample_text() -> String {
    "maximum_simulated_time: 200\n\
     number_of_sections_before_intersection: 10\n\
     green_north_south: 14\n\
     yellow_north_south: 3\n\
     green_east_west: 11\n\
     yellow_east_west: 2\n\
     prob_new_vehicle_northbound: 0.25\n\
     prob_new_vehicle_southbound: 0.15\n\
     prob_new_vehicle_eastbound: 0.3\n\
     prob_new_vehicle_westbound: 0.1\n\
     proportion_of_cars: 0.6\n\
     proportion_of_SUVs: 0.25\n\
     proportion_right_turn_cars: 0.1\n\
     proportion_left_turn_cars: 0.2\n\
     proportion_right_turn_SUVs: 0.15\n\
     proportion_left_turn_SUVs: 0.05\n\
     proportion_right_turn_trucks: 0.1\n\
     proportion_left_turn_trucks: 0.1\n"
        .to_string()
}

#[test]
fn parses_all_keys() {
    let config = SimConfig::from_str_contents(&sample_text()).expect("parse failed");
    assert_eq!(config.maximum_simulated_time, 200);
    assert_eq!(config.sections_before_intersection, 10);
    assert_eq!(config.green_north_south, 14);
    assert_eq!(config.yellow_east_west, 2);
    assert_eq!(config.arrival_probability, [0.25, 0.15, 0.3, 0.1]);
    assert_eq!(config.proportion_of_cars, 0.6);
    assert_eq!(config.turn_proportions_suvs, (0.15, 0.05));
    assert_eq!(config.turn_proportions_trucks, (0.1, 0.1));
}

#[test]
fn ignores_whitespace_and_blank_lines() {
    let spaced = sample_text()
        .replace(": ", "  :   ")
        .replace('\n', "\n\n  \n");
    let config = SimConfig::from_str_contents(&spaced).expect("parse failed");
    assert_eq!(config.maximum_simulated_time, 200);
    assert_eq!(config.arrival_probability[2], 0.3);
}

#[test]
fn missing_key_is_an_error() {
    let text = sample_text().replace("green_east_west: 11\n", "");
    let err = SimConfig::from_str_contents(&text).unwrap_err();
    assert!(err.to_string().contains("green_east_west"));
}

#[test]
fn bad_value_is_an_error() {
    let text = sample_text().replace("0.25", "often");
    assert!(SimConfig::from_str_contents(&text).is_err());
}

#[test]
fn unknown_keys_are_tolerated() {
    let mut text = sample_text();
    text.push_str("weather: 0.5\n");
    assert!(SimConfig::from_str_contents(&text).is_ok());
}

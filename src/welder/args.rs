//! Command-line argument mapping for the ArcWelder tool
//!
//! The flag set and ordering are fixed by the tool's CLI contract. Floats
//! are formatted with six decimals; tolerance is stored as a percentage
//! and divided by 100 before being handed to the tool.

use std::path::Path;

use crate::settings::WeldOptions;

/// Build the argument vector for one invocation, input path last.
pub fn command_arguments(options: &WeldOptions, input: &Path) -> Vec<String> {
    let mut arguments = vec![
        format!("-m={:.6}", options.maximum_radius),
        format!("-t={:.6}", options.tolerance_percent / 100.0),
        format!("-r={:.6}", options.resolution),
    ];

    if options.min_arc_segment > 0 {
        arguments.push(format!("-s={:.6}", options.mm_per_arc_segment));
        arguments.push(format!("-a={}", options.min_arc_segment));
    }

    if options.allow_3d_arcs {
        arguments.push("-z".to_string());
    }

    if options.g90_influences_extruder {
        arguments.push("-g".to_string());
    }

    arguments.push(input.display().to_string());

    arguments
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;
    use test_case::test_case;

    fn base_options() -> WeldOptions {
        WeldOptions {
            enabled: true,
            maximum_radius: 9999.0,
            tolerance_percent: 5.0,
            resolution: 0.05,
            min_arc_segment: 0,
            mm_per_arc_segment: 1.0,
            allow_3d_arcs: false,
            g90_influences_extruder: false,
        }
    }

    #[test]
    fn test_minimal_flag_set() {
        let options = base_options();
        let args = command_arguments(&options, &PathBuf::from("/tmp/plate.gcode"));

        assert_eq!(
            args,
            vec![
                "-m=9999.000000",
                "-t=0.050000",
                "-r=0.050000",
                "/tmp/plate.gcode",
            ]
        );
    }

    #[test]
    fn test_full_flag_set() {
        let options = WeldOptions {
            tolerance_percent: 20.0,
            min_arc_segment: 5,
            allow_3d_arcs: true,
            g90_influences_extruder: true,
            ..base_options()
        };
        let args = command_arguments(&options, &PathBuf::from("/tmp/plate.gcode"));

        assert_eq!(
            args,
            vec![
                "-m=9999.000000",
                "-t=0.200000",
                "-r=0.050000",
                "-s=1.000000",
                "-a=5",
                "-z",
                "-g",
                "/tmp/plate.gcode",
            ]
        );
    }

    #[test_case(0, false ; "zero segments omits firmware flags")]
    #[test_case(-3, false ; "negative segments omits firmware flags")]
    #[test_case(14, true ; "positive segments emits firmware flags")]
    fn test_firmware_flags_follow_min_arc_segment(min_arc_segment: i32, expected: bool) {
        let options = WeldOptions {
            min_arc_segment,
            ..base_options()
        };
        let args = command_arguments(&options, &PathBuf::from("x"));

        assert_eq!(args.iter().any(|a| a.starts_with("-s=")), expected);
        assert_eq!(args.iter().any(|a| a.starts_with("-a=")), expected);
    }

    #[test]
    fn test_input_path_is_last() {
        let options = WeldOptions {
            min_arc_segment: 14,
            allow_3d_arcs: true,
            ..base_options()
        };
        let args = command_arguments(&options, &PathBuf::from("/work/in.gcode"));

        assert_eq!(args.last().map(String::as_str), Some("/work/in.gcode"));
    }
}

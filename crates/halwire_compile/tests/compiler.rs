//! End-to-end properties of the wiring compiler: determinism, naming,
//! deduplication, fan-in combination, inversion tiering, constant
//! shadowing, and output-stream partitioning.

use halwire_compile::{CompileError, HalOutput, NetlistBuilder};
use halwire_diagnostics::DiagnosticSink;

fn compile(decls: &[(&str, &str)]) -> HalOutput {
    let sink = DiagnosticSink::new();
    let mut builder = NetlistBuilder::new();
    for (expr, dest) in decls {
        builder.declare(expr, dest, None, &sink);
    }
    builder.compile(&sink).unwrap()
}

fn uncommented<'a>(output: &'a HalOutput) -> impl Iterator<Item = &'a String> {
    output.hal.iter().filter(|l| !l.starts_with('#'))
}

#[test]
fn single_and_block_named_0_1() {
    let output = compile(&[("a AND b", "out1")]);
    assert!(output
        .hal
        .contains(&"loadrt logic names=func.and_0.1 personality=0x102".to_string()));
    assert!(output
        .hal
        .contains(&"addf func.and_0.1 servo-thread".to_string()));
    assert!(output
        .hal
        .contains(&format!("net {:30} => func.and_0.1.in-00", "sig_a")));
    assert!(output
        .hal
        .contains(&format!("net {:30} => func.and_0.1.in-01", "sig_b")));
    assert!(output
        .hal
        .contains(&format!("net {:30} <= func.and_0.1.and", "func_and_0_1_and")));
    assert!(output
        .hal
        .contains(&format!("net {:30} => out1", "func_and_0_1_and")));
}

#[test]
fn compilation_is_deterministic() {
    let sink = DiagnosticSink::new();
    let mut builder = NetlistBuilder::new();
    builder.declare("rio.input1 AND !rio.input2", "hal.output3", None, &sink);
    builder.declare("rio.input2 OR pyvcp.input3", "hal.or_out", None, &sink);
    builder.declare("rio.s32_1 - rio.s32_2", "hal.out-sint", None, &sink);
    builder.declare(
        "(sig:existing OR rio.input5) AND rio.input7",
        "pyvcp.complex_out",
        Some("my_complex_out"),
        &sink,
    );
    builder.assign_constant("rio.outval", "123");
    builder.add_raw_top("loadusr -W hal_manualtoolchange");

    let first = builder.compile(&sink).unwrap();
    let second = builder.compile(&sink).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.hal_text(), second.hal_text());
    assert_eq!(first.postgui_text(), second.postgui_text());
}

#[test]
fn pin_naming_is_idempotent_across_targets() {
    let output = compile(&[("rio.input1", "hal.out1"), ("rio.input1", "hal.out2")]);
    assert!(output
        .hal
        .contains(&format!("net {:30} <= rio.input1", "sig_rio_input1")));
    assert!(output
        .hal
        .contains(&format!("net {:30} => hal.out1", "sig_rio_input1")));
    assert!(output
        .hal
        .contains(&format!("net {:30} => hal.out2", "sig_rio_input1")));
    // the source pin is wired exactly once
    let source_wires = output
        .hal
        .iter()
        .filter(|l| l.ends_with("<= rio.input1"))
        .count();
    assert_eq!(source_wires, 1);
}

#[test]
fn identical_subexpressions_share_one_block() {
    let output = compile(&[
        ("(rio.input5 OR rio.input6)", "rio.orout1"),
        ("(rio.input5 OR rio.input6)", "rio.orout2"),
    ]);
    assert!(output
        .hal
        .contains(&"loadrt logic names=func.or_0.1 personality=0x202".to_string()));
    let loads = output
        .hal
        .iter()
        .filter(|l| l.starts_with("loadrt"))
        .count();
    assert_eq!(loads, 1);
    // both destinations consume the shared block output
    assert!(output
        .hal
        .contains(&format!("net {:30} => rio.orout1", "func_or_0_1_or")));
    assert!(output
        .hal
        .contains(&format!("net {:30} => rio.orout2", "func_or_0_1_or")));
}

#[test]
fn multiple_drivers_default_to_or() {
    let output = compile(&[("a", "out"), ("b", "out")]);
    assert!(output
        .hal
        .contains(&"loadrt logic names=func.or_0.1 personality=0x202".to_string()));
}

#[test]
fn first_declaration_marker_sets_the_combinator() {
    let output = compile(&[("&a", "out"), ("b", "out")]);
    assert!(output
        .hal
        .contains(&"loadrt logic names=func.and_0.1 personality=0x102".to_string()));
}

#[test]
fn explicit_marker_on_later_declaration_wins() {
    let output = compile(&[("a", "out"), ("&b", "out")]);
    assert!(output
        .hal
        .contains(&"loadrt logic names=func.and_0.1 personality=0x102".to_string()));
}

#[test]
fn three_drivers_build_one_three_input_gate() {
    let output = compile(&[("a", "out"), ("b", "out"), ("c", "out")]);
    assert!(output
        .hal
        .contains(&"loadrt logic names=func.or_0.1 personality=0x203".to_string()));
}

#[test]
fn native_invert_spends_no_block() {
    let output = compile(&[("!rio.input1", "hal.output2")]);
    assert!(!output.hal.iter().any(|l| l.starts_with("loadrt")));
    assert!(output
        .hal
        .contains(&format!("net {:30} <= rio.input1-not", "sig_rio_input1-not")));
    assert!(output
        .hal
        .contains(&format!("net {:30} => hal.output2", "sig_rio_input1-not")));
}

#[test]
fn foreign_invert_allocates_one_inverter() {
    let output = compile(&[("!pio.input1", "hal.output2")]);
    assert!(output
        .hal
        .contains(&"loadrt not names=func.not_pio_input1".to_string()));
    assert!(output
        .hal
        .contains(&"addf func.not_pio_input1 servo-thread".to_string()));
    assert!(output
        .hal
        .contains(&format!("net {:30} => func.not_pio_input1.in", "sig_pio_input1")));
}

#[test]
fn inverted_operand_inside_expression() {
    let output = compile(&[("rio.input1 AND !rio.input2", "hal.output3")]);
    assert!(output
        .hal
        .contains(&format!("net {:30} => func.and_0.1.in-01", "sig_rio_input2-not")));
}

#[test]
fn subtraction_uses_sum2_with_gain() {
    let output = compile(&[("rio.s32_1 - rio.s32_2", "hal.out-sint")]);
    assert!(output
        .hal
        .contains(&"loadrt sum2 names=func.sub2_0.1".to_string()));
    assert!(output
        .hal
        .contains(&format!("setp {:32} -1", "func.sub2_0.1.gain1")));
    assert!(output
        .hal
        .contains(&format!("net {:30} => hal.out-sint", "func_sub2_0_1_out")));
}

#[test]
fn scaled_sum_uses_scaled_output_port() {
    let output = compile(&[("rio.a s+ rio.b", "hal.out")]);
    assert!(output
        .hal
        .contains(&"loadrt scaled_s32_sums names=func.scaled_s32_sums_0.1".to_string()));
    assert!(output.hal.contains(&format!(
        "net {:30} <= func.scaled_s32_sums_0.1.out-s",
        "func_scaled_s32_sums_0_1_out-s"
    )));
}

#[test]
fn literal_operand_becomes_setp() {
    let output = compile(&[("rio.speed * 2", "hal.out")]);
    assert!(output
        .hal
        .contains(&format!("setp {:30}   2", "func.mult2_0.1.in1")));
}

#[test]
fn shadowed_constant_is_dropped_and_reported() {
    let sink = DiagnosticSink::new();
    let mut builder = NetlistBuilder::new();
    builder.declare("a", "rio.orout1", None, &sink);
    builder.assign_constant("rio.orout1", "0");
    let output = builder.compile(&sink).unwrap();

    assert!(!uncommented(&output).any(|l| l.starts_with("setp rio.orout1")));
    assert!(output
        .hal
        .iter()
        .any(|l| l.starts_with("# setp rio.orout1") && l.contains("already linked")));
    let diags = sink.diagnostics();
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].code, halwire_compile::codes::REDUNDANT_CONSTANT);
}

#[test]
fn unshadowed_constant_is_emitted() {
    let sink = DiagnosticSink::new();
    let mut builder = NetlistBuilder::new();
    builder.assign_constant("rio.outval", "123");
    let output = builder.compile(&sink).unwrap();
    assert!(output
        .hal
        .contains(&format!("setp {:30}   123", "rio.outval")));
    assert!(sink.is_empty());
}

#[test]
fn deferred_constant_moves_to_postgui() {
    let sink = DiagnosticSink::new();
    let mut builder = NetlistBuilder::new();
    builder.assign_constant("pyvcp.outval", "123");
    let output = builder.compile(&sink).unwrap();
    assert!(!uncommented(&output).any(|l| l.contains("pyvcp.outval")));
    assert!(output
        .postgui
        .contains(&format!("setp {:30}   123", "pyvcp.outval")));
}

#[test]
fn deferred_wires_are_commented_and_duplicated() {
    let output = compile(&[("rio.input2 OR pyvcp.input3", "hal.or_out")]);
    assert!(!uncommented(&output).any(|l| l.contains("pyvcp.input3")));
    assert!(output
        .hal
        .iter()
        .any(|l| l.starts_with("# net") && l.contains("pyvcp.input3") && l.ends_with("(in postgui)")));
    assert!(output
        .postgui
        .contains(&format!("net {:30} <= pyvcp.input3", "sig_pyvcp_input3")));
}

#[test]
fn virtual_wires_never_materialize() {
    let output = compile(&[("riov.loop0", "hal.out")]);
    assert!(!uncommented(&output).any(|l| l.contains("riov.loop0")));
    assert!(!output.postgui.iter().any(|l| l.contains("riov.loop0")));
    assert!(output
        .hal
        .iter()
        .any(|l| l.starts_with("# net") && l.ends_with("(virtual pin)")));
}

#[test]
fn signal_alias_is_used_verbatim() {
    let output = compile(&[("sig:estop-loop OR rio.input1", "hal.out")]);
    assert!(output
        .hal
        .contains(&format!("net {:30} => func.or_0.1.in-00", "estop-loop")));
    // no source wire is synthesized for an alias
    assert!(!output.hal.iter().any(|l| l.contains("<= sig:estop-loop")));
}

#[test]
fn signal_name_override_applies_to_final_wire() {
    let sink = DiagnosticSink::new();
    let mut builder = NetlistBuilder::new();
    builder.declare("rio.input1", "pyvcp.lamp", Some("my_lamp"), &sink);
    let output = builder.compile(&sink).unwrap();
    assert!(output
        .hal
        .contains(&format!("net {:30} <= rio.input1", "my_lamp")));
    assert!(output
        .postgui
        .contains(&format!("net {:30} => pyvcp.lamp", "my_lamp")));
}

#[test]
fn raw_lines_are_reproduced() {
    let sink = DiagnosticSink::new();
    let mut builder = NetlistBuilder::new();
    builder.add_raw_top("loadusr -W hal_manualtoolchange");
    builder.add_raw("net tool-change iocontrol.0.tool-change");
    let output = builder.compile(&sink).unwrap();
    let top_pos = output
        .hal
        .iter()
        .position(|l| l == "loadusr -W hal_manualtoolchange")
        .unwrap();
    let bottom_pos = output
        .hal
        .iter()
        .position(|l| l == "net tool-change iocontrol.0.tool-change")
        .unwrap();
    assert!(top_pos < bottom_pos);
}

#[test]
fn unbalanced_parens_fail_compilation() {
    let sink = DiagnosticSink::new();
    let mut builder = NetlistBuilder::new();
    builder.declare("(rio.a AND rio.b", "hal.out", None, &sink);
    let err = builder.compile(&sink).unwrap_err();
    assert!(matches!(err, CompileError::UnbalancedParens(_)));
}

#[test]
fn unknown_operator_fails_compilation() {
    let sink = DiagnosticSink::new();
    let mut builder = NetlistBuilder::new();
    builder.declare("rio.a XAND rio.b", "hal.out", None, &sink);
    let err = builder.compile(&sink).unwrap_err();
    assert!(matches!(err, CompileError::UnknownOperator { .. }));
}

#[test]
fn inverter_only_target_shifts_the_next_target_index() {
    let output = compile(&[("!pio.input1", "hal.out1"), ("a AND b", "hal.out2")]);
    assert!(output
        .hal
        .contains(&"loadrt logic names=func.and_1.1 personality=0x102".to_string()));
}

#[test]
fn inverted_operand_numbers_later_blocks_past_the_inverter() {
    let output = compile(&[("(rio.a AND !pio.b) OR rio.c", "hal.out")]);
    // the inner gate is named before its operands bind; the inverter then
    // takes 0.2, so the outer gate lands on 0.3
    assert!(output
        .hal
        .contains(&"loadrt logic names=func.and_0.1,func.or_0.3 personality=0x102,0x202".to_string()));
}

#[test]
fn second_target_gets_its_own_index() {
    let output = compile(&[("a AND b", "out1"), ("c OR d", "out2")]);
    assert!(output
        .hal
        .contains(&"loadrt logic names=func.and_0.1,func.or_1.1 personality=0x102,0x202".to_string()));
}

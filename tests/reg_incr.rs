use regincr::{prelude::*, reg_incr};

fn word(v: u8) -> Word {
    v.cast()
}

fn drive(sim: &mut Simulator<RegIncr>, inputs: &[u8]) -> Vec<u8> {
    sim.run(inputs.iter().copied().map(word))
        .unwrap()
        .into_iter()
        .map(u8::cast_from)
        .collect()
}

#[test]
fn increments_after_reset() {
    let mut sim = Simulator::<RegIncr>::new().with_line_trace(true);
    sim.sim_reset().unwrap();

    assert_eq!(drive(&mut sim, &[5, 0, 255]), [6, 1, 0]);
    assert_eq!(&sim.lines()[2 ..], [
        "  2: 05 (05) 06",
        "  3: 00 (00) 01",
        "  4: ff (ff) 00"
    ]);
}

#[test]
fn reset_overrides_input() {
    let mut sim = Simulator::<RegIncr>::new();
    drive(&mut sim, &[0x42]);

    sim.set_reset(true);
    assert_eq!(drive(&mut sim, &[0x10, 0xff]), [1, 1]);

    sim.set_reset(false);
    assert_eq!(drive(&mut sim, &[0x10]), [0x11]);
}

#[test]
fn out_follows_register() {
    let mut sim = Simulator::<RegIncr>::new();
    for v in [0_u8, 1, 2, 100, 254, 255] {
        sim.set_input(word(v));
        sim.tick().unwrap();
        let reg = u8::cast_from(sim.state().reg_out);
        assert_eq!(reg, v);
        assert_eq!(u8::cast_from(sim.out()), reg.wrapping_add(1));
    }
}

#[test]
fn vectors_from_text() {
    let vectors: TestVectors<RegIncr> = "
        0x00 ?
        0x13 0x01
        0x27 0x14
        0xff 0x28
        0x00 0x00
        0x05 0x01
        # wraps only after the register holds 0xff
        0xff 0x06
        0x00 0x00
    "
    .parse()
    .unwrap();

    let mut sim = Simulator::new();
    vectors.run(&mut sim).unwrap();
}

#[test]
fn vectors_detect_mismatch() {
    let vectors: TestVectors<RegIncr> = "0x01 0x01\n0x02 0x03\n".parse().unwrap();

    let mut sim = Simulator::new();
    let err = vectors.run(&mut sim).unwrap_err();
    assert!(matches!(err, Error::Mismatch { cycle: 3, .. }), "{err}");
    assert!(err.to_string().contains("out"), "{err}");
}

#[test]
fn translates_to_verilog() {
    let module = reg_incr::netlist(MODULE_NAME);
    let verilog = Verilog::new(&module).generate();

    assert!(verilog.starts_with("module RegIncrRTL\n"), "{verilog}");
    for line in [
        "input clk,",
        "input reset,",
        "input [7:0] in_,",
        "output [7:0] out",
        "reg [7:0] reg_out;",
        "wire [7:0] temp_wire;",
        "always @ (posedge clk) begin",
        "if (reset)",
        "reg_out <= 8'd0;",
        "reg_out <= in_;",
        "assign temp_wire = reg_out + 8'd1;",
        "assign out = temp_wire;",
    ] {
        assert!(
            verilog.lines().any(|l| l.trim() == line),
            "missing `{line}`:\n{verilog}"
        );
    }
    assert!(verilog.ends_with("endmodule\n"), "{verilog}");
}

#[test]
fn custom_module_name() {
    let module = reg_incr::netlist("Incr");
    let verilog = Verilog::new(&module).generate();
    assert!(verilog.starts_with("module Incr\n"), "{verilog}");
}

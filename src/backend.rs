use rustc_hash::FxHashSet;

use crate::{
    buffer::Buffer,
    netlist::{Module, Net, NetId, Node, Operand},
};

/// Renders a [`Module`] as Verilog.
pub struct Verilog<'m> {
    buffer: Buffer,
    locals: FxHashSet<NetId>,
    regs: FxHashSet<NetId>,
    module: &'m Module,
}

impl<'m> Verilog<'m> {
    pub fn new(module: &'m Module) -> Self {
        Self {
            buffer: Buffer::new(),
            locals: FxHashSet::default(),
            regs: FxHashSet::default(),
            module,
        }
    }

    pub fn generate(mut self) -> String {
        self.visit_module();

        self.buffer.buffer
    }

    fn write_ty(&mut self, net: &Net) {
        self.buffer.write_fmt(format_args!("{}", net.kind));
        self.write_width(net);
    }

    fn write_width(&mut self, net: &Net) {
        if net.width > 1 {
            self.buffer.write_fmt(format_args!(" [{}:0]", net.width - 1));
        }
    }

    fn value(width: u32, value: u128) -> String {
        format!("{width}'d{value}")
    }

    fn operand(&self, operand: Operand, width: u32) -> String {
        match operand {
            Operand::Net(id) => self.module[id].sym.clone(),
            Operand::Const(value) => Self::value(width, value),
        }
    }

    fn write_local(&mut self, id: NetId) {
        if self.module.is_port(id) || !self.locals.insert(id) {
            return;
        }

        let module = self.module;
        let net = &module[id];
        self.buffer.write_tab();
        self.write_ty(net);
        self.buffer.write_fmt(format_args!(" {};\n", net.sym));
        self.buffer.write_eol();
    }

    fn write_ports(&mut self, header: &str, dir: &str, ports: Vec<NetId>) {
        if ports.is_empty() {
            return;
        }

        self.buffer.write_tab();
        self.buffer.write_fmt(format_args!("// {header}\n"));
        let module = self.module;
        for port in ports {
            let net = &module[port];
            self.buffer.write_tab();
            self.buffer.write_str(dir);
            if self.regs.contains(&port) {
                self.buffer.write_str(" reg");
            }
            self.write_width(net);
            self.buffer.write_fmt(format_args!(" {},\n", net.sym));
        }
    }

    fn visit_module(&mut self) {
        self.locals.clear();
        let module = self.module;
        self.regs = module
            .nodes()
            .iter()
            .filter(|node| matches!(node, Node::Dff { .. }))
            .map(Node::output)
            .collect();

        if module.inputs().chain(module.outputs()).next().is_none() {
            self.buffer.write_fmt(format_args!("module {};\n", module.name()));
        } else {
            self.buffer
                .write_fmt(format_args!("module {}\n(\n", module.name()));
            self.buffer.push_tab();

            self.write_ports("Inputs", "input", module.inputs().collect());
            self.write_ports("Outputs", "output", module.outputs().collect());

            // strip the separator after the last port
            self.buffer.pop(2);
            self.buffer.pop_tab();
            self.buffer.write_str("\n);\n");
        }

        self.buffer.push_tab();
        self.buffer.write_eol();

        for node in module.nodes() {
            self.visit_node(node);
        }

        self.buffer.pop_tab();

        self.buffer.write_str("endmodule\n");
    }

    fn visit_node(&mut self, node: &Node) {
        let module = self.module;
        self.write_local(node.output());

        match node {
            Node::Dff {
                clk,
                rst,
                rst_val,
                data,
                output,
            } => {
                let clk = &module[*clk].sym;
                let data = &module[*data].sym;
                let out = &module[*output];
                let output = &out.sym;

                match rst {
                    Some(rst) => {
                        let rst = &module[*rst].sym;
                        let rst_val = Self::value(out.width, *rst_val);
                        self.buffer.write_template(format_args!(
                            "
always @ (posedge {clk}) begin
    if ({rst})
        {output} <= {rst_val};
    else
        {output} <= {data};
end
"
                        ));
                    }
                    None => {
                        self.buffer.write_template(format_args!(
                            "
always @ (posedge {clk}) begin
    {output} <= {data};
end
"
                        ));
                    }
                }
            }
            Node::BinOp {
                op,
                lhs,
                rhs,
                output,
            } => {
                let out = &module[*output];
                let lhs = self.operand(*lhs, out.width);
                let rhs = self.operand(*rhs, out.width);
                let output = &out.sym;

                self.buffer
                    .write_template(format_args!("assign {output} = {lhs} {op} {rhs};"));
            }
            Node::Pass { input, output } => {
                let input = &module[*input].sym;
                let output = &module[*output].sym;

                self.buffer
                    .write_template(format_args!("assign {output} = {input};"));
            }
        }
    }
}

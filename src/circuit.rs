//! Boolean circuit DAG in Bristol text form.
//!
//! Gates live in a dense arena indexed by [`GateId`]; fan-in and fan-out
//! edges are index lists, which sidesteps the ownership cycle a doubly
//! linked graph would otherwise create and lets traversal sets be plain
//! bitmaps over arena indices. The loader, serializer and structural
//! transforms are generic over the wire value type; evaluation takes the
//! gate operation as a strategy closure, so the same DAG serves both
//! clear-text bits and encrypted bit matrices.

use std::collections::VecDeque;
use std::io::{self, Read, Write};

use crate::error::{Error, Result};

/// Gate variants. `Val` marks input-only (or not-yet-defined) wires.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateKind {
    And,
    Xor,
    Inv,
    Nand,
    Val,
}

impl GateKind {
    fn from_token(tok: &str) -> Result<Self> {
        match tok {
            "AND" => Ok(Self::And),
            "XOR" => Ok(Self::Xor),
            "INV" => Ok(Self::Inv),
            "NAND" => Ok(Self::Nand),
            other => Err(Error::Format(format!("unknown gate type: {other}"))),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Xor => "XOR",
            Self::Inv => "INV",
            Self::Nand => "NAND",
            Self::Val => "VAL",
        }
    }
}

/// Dense arena index of a gate.
pub type GateId = usize;

/// One gate: kind, edge lists and the wire value slot.
#[derive(Clone, Debug)]
pub struct Gate<T> {
    pub kind: GateKind,
    /// Predecessors; length 1 for INV, 2 otherwise (duplicated when both
    /// operands are the same wire).
    pub inputs: Vec<GateId>,
    /// Successors; one entry per distinct consumer.
    pub outputs: Vec<GateId>,
    value: Option<T>,
    id: Option<usize>,
}

impl<T> Gate<T> {
    fn new(kind: GateKind) -> Self {
        Self {
            kind,
            inputs: Vec::new(),
            outputs: Vec::new(),
            value: None,
            id: None,
        }
    }

    /// Distinct predecessors (a doubled in-edge counts once).
    fn distinct_inputs(&self) -> usize {
        match self.inputs.as_slice() {
            [a, b] if a == b => 1,
            list => list.len(),
        }
    }
}

/// A circuit DAG plus the header bookkeeping of the Bristol format.
#[derive(Clone, Debug)]
pub struct Circuit<T> {
    gates: Vec<Gate<T>>,
    pub inputs: Vec<GateId>,
    pub outputs: Vec<GateId>,
    pub num_gates: usize,
    pub num_wires: usize,
    pub num_in1: usize,
    pub num_in2: usize,
    pub num_out: usize,
}

/// Whitespace tokenizer over the full circuit text.
struct Tokens<'a> {
    iter: std::str::SplitWhitespace<'a>,
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            iter: text.split_whitespace(),
        }
    }

    fn next_str(&mut self) -> Result<&'a str> {
        self.iter.next().ok_or_else(|| {
            Error::Io(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "circuit description ended early",
            ))
        })
    }

    fn next_usize(&mut self) -> Result<usize> {
        let tok = self.next_str()?;
        tok.parse()
            .map_err(|_| Error::Format(format!("expected a number, got {tok:?}")))
    }
}

impl<T> Circuit<T> {
    /// Parse a circuit from Bristol-style text.
    pub fn parse<R: Read>(mut reader: R) -> Result<Self> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        let mut toks = Tokens::new(&text);

        let num_gates = toks.next_usize()?;
        let num_wires = toks.next_usize()?;
        let num_in1 = toks.next_usize()?;
        let num_in2 = toks.next_usize()?;
        let num_out = toks.next_usize()?;
        if num_in1 + num_in2 > num_wires || num_out > num_wires {
            return Err(Error::Format(format!(
                "header inconsistent: {} inputs and {num_out} outputs in {num_wires} wires",
                num_in1 + num_in2
            )));
        }

        let mut gates: Vec<Gate<T>> = (0..num_wires).map(|_| Gate::new(GateKind::Val)).collect();
        let inputs: Vec<GateId> = (0..num_in1 + num_in2).collect();
        let outputs: Vec<GateId> = (num_wires - num_out..num_wires).collect();

        let wire = |toks: &mut Tokens| -> Result<GateId> {
            let id = toks.next_usize()?;
            if id >= num_wires {
                return Err(Error::Format(format!("wire id {id} out of range")));
            }
            Ok(id)
        };

        for _ in 0..num_gates {
            let in_count = toks.next_usize()?;
            let out_count = toks.next_usize()?;
            if out_count != 1 {
                return Err(Error::Format(format!(
                    "gates drive exactly one wire, got out count {out_count}"
                )));
            }
            let (in1, in2) = match in_count {
                1 => (wire(&mut toks)?, None),
                2 => (wire(&mut toks)?, Some(wire(&mut toks)?)),
                other => {
                    return Err(Error::Format(format!("unsupported gate fan-in {other}")));
                }
            };
            let out = wire(&mut toks)?;
            let kind = GateKind::from_token(toks.next_str()?)?;

            gates[out].kind = kind;
            gates[in1].outputs.push(out);
            gates[out].inputs.push(in1);
            if let Some(in2) = in2 {
                if in2 != in1 {
                    gates[in2].outputs.push(out);
                }
                gates[out].inputs.push(in2);
            }
        }

        Ok(Self {
            gates,
            inputs,
            outputs,
            num_gates,
            num_wires,
            num_in1,
            num_in2,
            num_out,
        })
    }

    /// Arena view, e.g. for inspecting gate kinds after a transform.
    pub fn gates(&self) -> &[Gate<T>] {
        &self.gates
    }

    /// Clear every value slot and serialization id.
    pub fn reset(&mut self) {
        for g in &mut self.gates {
            g.value = None;
            g.id = None;
        }
    }

    /// Number of BFS layers from the input frontier, counting the input
    /// layer itself. This is the L fed to parameter setup.
    pub fn depth(&self) -> usize {
        let mut seen = vec![false; self.gates.len()];
        let mut layer: Vec<GateId> = Vec::new();
        for &g in &self.inputs {
            if !seen[g] {
                seen[g] = true;
                layer.push(g);
            }
        }
        let mut depth = 0;
        while !layer.is_empty() {
            let mut next = Vec::new();
            for &g in &layer {
                for &s in &self.gates[g].outputs {
                    if !seen[s] {
                        seen[s] = true;
                        next.push(s);
                    }
                }
            }
            layer = next;
            depth += 1;
        }
        depth
    }

    /// Write the circuit back out in Bristol form.
    ///
    /// Outputs are assigned the top `num_out` wire ids first, inputs get
    /// `0..`, and the remaining ids are handed out in BFS order from the
    /// inputs; gate lines are emitted in that same traversal order.
    pub fn serialize<W: Write>(&mut self, w: &mut W) -> Result<()> {
        self.reset();

        writeln!(w, "{}\t{}", self.num_gates, self.num_wires)?;
        writeln!(w, "{}\t{}\t{}", self.num_in1, self.num_in2, self.num_out)?;
        writeln!(w)?;

        let mut next_id = self.num_wires - self.outputs.len();
        for &o in &self.outputs.clone() {
            self.gates[o].id = Some(next_id);
            next_id += 1;
        }

        let mut next_id = 0usize;
        let mut queue: VecDeque<GateId> = VecDeque::new();
        for &g in &self.inputs.clone() {
            self.gates[g].id = Some(next_id);
            next_id += 1;
            for &s in &self.gates[g].outputs.clone() {
                queue.push_back(s);
            }
        }

        let mut printed = vec![false; self.gates.len()];
        while let Some(g) = queue.pop_front() {
            let gid = match self.gates[g].id {
                Some(v) => v,
                None => {
                    self.gates[g].id = Some(next_id);
                    next_id += 1;
                    next_id - 1
                }
            };
            if printed[g] {
                continue;
            }
            printed[g] = true;

            if self.gates[g].kind == GateKind::Val {
                return Err(Error::Domain(format!(
                    "wire {gid} is consumed but never driven by a gate"
                )));
            }

            write!(w, "{}\t1", self.gates[g].inputs.len())?;
            for p in self.gates[g].inputs.clone() {
                let pid = match self.gates[p].id {
                    Some(v) => v,
                    None => {
                        self.gates[p].id = Some(next_id);
                        next_id += 1;
                        next_id - 1
                    }
                };
                write!(w, "\t{pid}")?;
            }
            writeln!(w, "\t{gid}\t{}", self.gates[g].kind.name())?;

            for &s in &self.gates[g].outputs.clone() {
                queue.push_back(s);
            }
        }
        Ok(())
    }

    /// Keep only the gates feeding an output whose mask bit is set, then
    /// recount the header fields. `in1` caps how many surviving inputs are
    /// still counted as first-operand inputs.
    pub fn reduce(&mut self, mask: &[bool], in1: usize)
    where
        T: Clone,
    {
        self.reset();

        let mut alive = vec![false; self.gates.len()];
        let mut queue: VecDeque<GateId> = VecDeque::new();
        for (k, &o) in self.outputs.iter().enumerate() {
            if mask.get(k).copied().unwrap_or(false) {
                alive[o] = true;
                for &p in &self.gates[o].inputs {
                    queue.push_back(p);
                }
            }
        }
        while let Some(g) = queue.pop_front() {
            if alive[g] {
                continue;
            }
            alive[g] = true;
            for &p in &self.gates[g].inputs {
                queue.push_back(p);
            }
        }

        let mut remap = vec![usize::MAX; self.gates.len()];
        let mut kept: Vec<Gate<T>> = Vec::new();
        for (i, g) in self.gates.iter().enumerate() {
            if alive[i] {
                remap[i] = kept.len();
                kept.push(g.clone());
            }
        }
        for g in &mut kept {
            g.inputs = g.inputs.iter().map(|&p| remap[p]).collect();
            g.outputs = g
                .outputs
                .iter()
                .filter(|&&s| alive[s])
                .map(|&s| remap[s])
                .collect();
        }
        self.inputs = self
            .inputs
            .iter()
            .filter(|&&g| alive[g])
            .map(|&g| remap[g])
            .collect();
        self.outputs = self
            .outputs
            .iter()
            .filter(|&&g| alive[g])
            .map(|&g| remap[g])
            .collect();
        self.gates = kept;

        self.num_out = self.outputs.len();
        self.num_in1 = self.inputs.len().min(in1);
        self.num_in2 = self.inputs.len() - self.num_in1;
        self.num_wires = self.gates.len();
        self.num_gates = self.gates.len() - self.inputs.len();
    }

    /// Rewrite every AND/XOR/INV gate into an equivalent NAND-only
    /// subgraph, preserving the output wires.
    pub fn nand_recode(&mut self) {
        let mut queue: VecDeque<GateId> = VecDeque::new();
        for &g in &self.inputs {
            for &s in &self.gates[g].outputs {
                queue.push_back(s);
            }
        }
        let mut visited = vec![false; self.gates.len()];
        while let Some(g) = queue.pop_front() {
            if visited.len() < self.gates.len() {
                visited.resize(self.gates.len(), false);
            }
            if visited[g] {
                continue;
            }
            visited[g] = true;

            let grown = match self.gates[g].kind {
                GateKind::And => self.and_to_nand(g),
                GateKind::Xor => self.xor_to_nand(g),
                GateKind::Inv => self.inv_to_nand(g),
                _ => 0,
            };
            self.num_wires += grown;
            self.num_gates += grown;

            for &s in &self.gates[g].outputs.clone() {
                queue.push_back(s);
            }
        }
    }

    fn alloc(&mut self, kind: GateKind) -> GateId {
        self.gates.push(Gate::new(kind));
        self.gates.len() - 1
    }

    /// Point every `old`-targeting out-edge of the given predecessors at
    /// `new`. Applied after a rewrite has been fully computed, so a BFS in
    /// flight never observes a half-patched edge list.
    fn patch_out_edges(&mut self, preds: &[GateId], old: GateId, new: GateId) {
        for &p in preds {
            for s in self.gates[p].outputs.iter_mut() {
                if *s == old {
                    *s = new;
                }
            }
        }
    }

    /// `AND(a, b) = NAND(g1, g1)` with `g1 = NAND(a, b)`.
    fn and_to_nand(&mut self, g2: GateId) -> usize {
        let operands = self.gates[g2].inputs.clone();
        let g1 = self.alloc(GateKind::Nand);
        self.gates[g1].inputs = operands.clone();
        self.gates[g1].outputs.push(g2);
        self.patch_out_edges(&operands, g2, g1);

        let gate = &mut self.gates[g2];
        gate.kind = GateKind::Nand;
        gate.value = None;
        gate.inputs = vec![g1, g1];
        1
    }

    /// `INV(a) = NAND(a, a)`: no new gate, the single in-edge is doubled.
    fn inv_to_nand(&mut self, g: GateId) -> usize {
        let gate = &mut self.gates[g];
        gate.kind = GateKind::Nand;
        gate.value = None;
        let a = gate.inputs[0];
        gate.inputs.push(a);
        0
    }

    /// `XOR(a, b) = NAND(NAND(a, s), NAND(b, s))` with `s = NAND(a, b)`.
    fn xor_to_nand(&mut self, end: GateId) -> usize {
        let operands = self.gates[end].inputs.clone();
        let start = self.alloc(GateKind::Nand);
        let g1 = self.alloc(GateKind::Nand);
        let g2 = self.alloc(GateKind::Nand);

        self.gates[start].inputs = operands.clone();
        self.gates[start].outputs = vec![g1, g2];
        self.gates[g1].inputs = vec![operands[0], start];
        self.gates[g1].outputs = vec![end];
        self.gates[g2].inputs = vec![operands[1], start];
        self.gates[g2].outputs = vec![end];

        self.patch_out_edges(&operands, end, start);
        self.gates[operands[0]].outputs.push(g1);
        self.gates[operands[1]].outputs.push(g2);

        let gate = &mut self.gates[end];
        gate.kind = GateKind::Nand;
        gate.value = None;
        gate.inputs = vec![g1, g2];
        3
    }

    /// Evaluate with a caller-supplied gate operation, one topological pass
    /// from the input layer (Kahn's scheme over distinct predecessors).
    ///
    /// Gates with an undriven predecessor are never scheduled; an undriven
    /// *output* is an error.
    pub fn eval_with<F>(&mut self, values: &[T], mut op: F) -> Result<Vec<T>>
    where
        T: Clone,
        F: FnMut(GateKind, &[&T]) -> Result<T>,
    {
        if values.len() != self.inputs.len() {
            return Err(Error::Domain(format!(
                "circuit expects {} input values, got {}",
                self.inputs.len(),
                values.len()
            )));
        }
        self.reset();

        let mut missing: Vec<usize> = self.gates.iter().map(Gate::distinct_inputs).collect();
        let mut fired: VecDeque<GateId> = VecDeque::new();
        for (&g, val) in self.inputs.iter().zip(values) {
            self.gates[g].value = Some(val.clone());
            fired.push_back(g);
        }

        while let Some(g) = fired.pop_front() {
            let mut succs = self.gates[g].outputs.clone();
            succs.sort_unstable();
            succs.dedup();
            for s in succs {
                missing[s] = missing[s].saturating_sub(1);
                if missing[s] > 0 || self.gates[s].value.is_some() {
                    continue;
                }
                let operand_ids = self.gates[s].inputs.clone();
                let mut operands: Vec<&T> = Vec::with_capacity(operand_ids.len());
                for &p in &operand_ids {
                    match self.gates[p].value.as_ref() {
                        Some(v) => operands.push(v),
                        None => {
                            return Err(Error::Domain(
                                "gate scheduled before its operands were ready".into(),
                            ))
                        }
                    }
                }
                let value = op(self.gates[s].kind, &operands)?;
                self.gates[s].value = Some(value);
                fired.push_back(s);
            }
        }

        self.outputs
            .iter()
            .map(|&o| {
                self.gates[o]
                    .value
                    .clone()
                    .ok_or_else(|| Error::Domain("circuit output was never driven".into()))
            })
            .collect()
    }
}

impl Circuit<u8> {
    /// Clear-text evaluation over bits.
    pub fn eval(&mut self, bits: &[u8]) -> Result<Vec<u8>> {
        self.eval_with(bits, |kind, operands| match kind {
            GateKind::Xor => Ok(operands[0] ^ operands[1]),
            GateKind::And => Ok(operands[0] & operands[1]),
            GateKind::Inv => Ok(u8::from(*operands[0] == 0)),
            GateKind::Nand => Ok(u8::from(operands[0] & operands[1] == 0)),
            GateKind::Val => Err(Error::Domain(
                "VAL gate in the interior of the circuit".into(),
            )),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const XOR_CIRCUIT: &str = "1\t3\n1\t1\t1\n\n2 1 0 1 2 XOR\n";

    const FOUR_OUT_CIRCUIT: &str = "\
4\t6
1\t1\t4

2 1 0 1 2 AND
2 1 0 1 3 XOR
2 1 0 1 4 NAND
1 1 0 5 INV
";

    fn parse_clear(text: &str) -> Circuit<u8> {
        Circuit::parse(text.as_bytes()).expect("test circuit parses")
    }

    #[test]
    fn parses_header_and_edges() {
        let c = parse_clear(XOR_CIRCUIT);
        assert_eq!(c.num_gates, 1);
        assert_eq!(c.num_wires, 3);
        assert_eq!((c.num_in1, c.num_in2, c.num_out), (1, 1, 1));
        assert_eq!(c.inputs, vec![0, 1]);
        assert_eq!(c.outputs, vec![2]);
        assert_eq!(c.gates()[2].kind, GateKind::Xor);
        assert_eq!(c.gates()[2].inputs, vec![0, 1]);
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(matches!(
            Circuit::<u8>::parse("1\t3\n1\t1\t1\n\n2 1 0 1 2 NOR\n".as_bytes()),
            Err(Error::Format(_))
        ));
        assert!(matches!(
            Circuit::<u8>::parse("1\t3\n1\t1\t1\n\n2 1 0 9 2 XOR\n".as_bytes()),
            Err(Error::Format(_))
        ));
        assert!(matches!(
            Circuit::<u8>::parse("1\t3\n1\t1\t1\n\n2 1 0 1".as_bytes()),
            Err(Error::Io(_))
        ));
    }

    #[test]
    fn clear_eval_of_xor() {
        let mut c = parse_clear(XOR_CIRCUIT);
        assert_eq!(c.eval(&[0, 1]).unwrap(), vec![1]);
        assert_eq!(c.eval(&[1, 1]).unwrap(), vec![0]);
        assert_eq!(c.eval(&[0, 0]).unwrap(), vec![0]);
        assert_eq!(c.eval(&[1, 0]).unwrap(), vec![1]);
    }

    #[test]
    fn clear_eval_of_all_gate_kinds() {
        let mut c = parse_clear(FOUR_OUT_CIRCUIT);
        assert_eq!(c.eval(&[1, 1]).unwrap(), vec![1, 0, 0, 0]);
        assert_eq!(c.eval(&[0, 1]).unwrap(), vec![0, 1, 1, 1]);
    }

    #[test]
    fn nand_recode_preserves_xor_semantics() {
        let mut c = parse_clear(XOR_CIRCUIT);
        c.nand_recode();
        assert_eq!(c.num_gates, 4);
        assert_eq!(c.num_wires, 6);
        for (i, g) in c.gates().iter().enumerate() {
            if !c.inputs.contains(&i) {
                assert_eq!(g.kind, GateKind::Nand, "gate {i} not recoded");
            }
        }
        for (a, b) in [(0, 0), (0, 1), (1, 0), (1, 1)] {
            assert_eq!(c.eval(&[a, b]).unwrap(), vec![a ^ b], "XOR({a},{b})");
        }
    }

    #[test]
    fn nand_recode_preserves_every_gate_kind() {
        let mut c = parse_clear(FOUR_OUT_CIRCUIT);
        c.nand_recode();
        // AND grows by 1, XOR by 3, NAND and INV stay.
        assert_eq!(c.num_gates, 8);
        assert_eq!(c.num_wires, 10);
        for (a, b) in [(0, 0), (0, 1), (1, 0), (1, 1)] {
            let expect = vec![a & b, a ^ b, u8::from(a & b == 0), u8::from(a == 0)];
            assert_eq!(c.eval(&[a, b]).unwrap(), expect, "inputs ({a},{b})");
        }
    }

    #[test]
    fn inv_recode_doubles_the_in_edge() {
        let mut c = parse_clear("1\t2\n1\t0\t1\n\n1 1 0 1 INV\n");
        c.nand_recode();
        assert_eq!(c.gates()[1].kind, GateKind::Nand);
        assert_eq!(c.gates()[1].inputs, vec![0, 0]);
        assert_eq!(c.eval(&[0]).unwrap(), vec![1]);
        assert_eq!(c.eval(&[1]).unwrap(), vec![0]);
    }

    #[test]
    fn reduce_keeps_masked_outputs() {
        let mut c = parse_clear(FOUR_OUT_CIRCUIT);
        c.reduce(&[true, false, true, false], 1);
        assert_eq!(c.num_out, 2);
        assert_eq!((c.num_in1, c.num_in2), (1, 1));
        assert_eq!(c.num_wires, 4);
        assert_eq!(c.num_gates, 2);
        for (a, b) in [(0, 0), (0, 1), (1, 0), (1, 1)] {
            let expect = vec![a & b, u8::from(a & b == 0)];
            assert_eq!(c.eval(&[a, b]).unwrap(), expect, "inputs ({a},{b})");
        }
    }

    #[test]
    fn reduce_drops_dead_inputs() {
        // Output depends only on wire 1; wires 0 and 2 die with the mask.
        let text = "2\t5\n2\t1\t2\n\n2 1 0 1 3 AND\n1 1 1 4 INV\n";
        let mut c = parse_clear(text);
        c.reduce(&[false, true], 2);
        assert_eq!(c.inputs.len(), 1);
        assert_eq!((c.num_in1, c.num_in2), (1, 0));
        assert_eq!(c.num_out, 1);
        assert_eq!(c.eval(&[1]).unwrap(), vec![0]);
        assert_eq!(c.eval(&[0]).unwrap(), vec![1]);
    }

    #[test]
    fn depth_counts_bfs_layers_from_inputs() {
        assert_eq!(parse_clear(XOR_CIRCUIT).depth(), 2);
        // Two chained gates: inputs, AND, INV.
        let chain = "2\t4\n1\t1\t1\n\n2 1 0 1 2 AND\n1 1 2 3 INV\n";
        assert_eq!(parse_clear(chain).depth(), 3);
        let mut recoded = parse_clear(XOR_CIRCUIT);
        recoded.nand_recode();
        assert_eq!(recoded.depth(), 3);
    }

    #[test]
    fn serialize_assigns_output_ids_last() {
        let mut c = parse_clear(XOR_CIRCUIT);
        c.nand_recode();
        let mut buf = Vec::new();
        c.serialize(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("4\t6"));
        assert_eq!(lines.next(), Some("1\t1\t1"));
        assert_eq!(lines.next(), Some(""));
        // Output wire carries the top id and every line is a NAND.
        let gate_lines: Vec<&str> = lines.collect();
        assert_eq!(gate_lines.len(), 4);
        assert!(gate_lines.iter().all(|l| l.ends_with("NAND")));
        // Fields: in_count, 1, in1, in2, out, TYPE; the output gate owns id 5.
        assert!(gate_lines.iter().any(|l| l.split('\t').nth(4) == Some("5")));
    }

    #[test]
    fn serialize_parse_round_trip() {
        let mut c = parse_clear(XOR_CIRCUIT);
        c.nand_recode();
        let mut buf = Vec::new();
        c.serialize(&mut buf).unwrap();
        let mut back: Circuit<u8> = Circuit::parse(buf.as_slice()).unwrap();
        assert_eq!(back.num_gates, c.num_gates);
        assert_eq!(back.num_wires, c.num_wires);
        assert_eq!((back.num_in1, back.num_in2, back.num_out), (1, 1, 1));
        for (a, b) in [(0, 0), (0, 1), (1, 0), (1, 1)] {
            assert_eq!(back.eval(&[a, b]).unwrap(), c.eval(&[a, b]).unwrap());
        }
    }

    #[test]
    fn eval_rejects_wrong_input_count() {
        let mut c = parse_clear(XOR_CIRCUIT);
        assert!(matches!(c.eval(&[1]), Err(Error::Domain(_))));
    }
}

use crate::core::io::traits::StructureFile;
use crate::core::models::atom::Atom;
use crate::core::models::bond::BondOrder;
use crate::core::models::molecule::{Molecule, MoleculeError};
use nalgebra::Point3;
use std::io::{self, BufRead};
use std::ops::Range;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SdfError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: SdfParseErrorKind },
    #[error("Record {record} uses an unsupported format: {format}")]
    Unsupported { record: usize, format: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SdfParseErrorKind {
    #[error("Record ended before its {0} was complete")]
    Truncated(&'static str),
    #[error("Invalid {field} (value: '{value}')")]
    InvalidNumber { field: &'static str, value: String },
    #[error("Atom line has no element symbol in columns 32-34")]
    MissingSymbol,
    #[error("Unsupported bond type {0}")]
    InvalidBondType(u8),
    #[error("Invalid bond: {0}")]
    InvalidBond(#[from] MoleculeError),
}

/// Reader for MDL SD files (V2000 connection tables).
pub struct SdfFile;

impl StructureFile for SdfFile {
    type Error = SdfError;
    type Records<R: BufRead> = SdfRecords<R>;

    fn records<R: BufRead>(reader: R) -> Self::Records<R> {
        SdfRecords::new(reader)
    }
}

/// Forward-only iterator over the records of an SD file.
///
/// Records are split on `$$$$` before parsing, so a malformed record produces one
/// error item and iteration resumes with the next record. Only an I/O failure of
/// the underlying reader ends the iteration early.
pub struct SdfRecords<R> {
    reader: R,
    line_number: usize,
    record_number: usize,
    finished: bool,
}

struct RawRecord {
    first_line: usize,
    lines: Vec<String>,
}

impl<R: BufRead> SdfRecords<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_number: 0,
            record_number: 0,
            finished: false,
        }
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut buf = Vec::new();
        if self.reader.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        self.line_number += 1;
        while matches!(buf.last(), Some(b'\n' | b'\r')) {
            buf.pop();
        }
        Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
    }

    fn read_raw_record(&mut self) -> io::Result<Option<RawRecord>> {
        let mut lines: Vec<String> = Vec::new();
        let mut first_line = self.line_number + 1;

        while let Some(line) = self.read_line()? {
            if line.starts_with("$$$$") {
                if lines.iter().all(|l| l.trim().is_empty()) {
                    lines.clear();
                    first_line = self.line_number + 1;
                    continue;
                }
                return Ok(Some(RawRecord { first_line, lines }));
            }
            lines.push(line);
        }

        if lines.iter().all(|l| l.trim().is_empty()) {
            Ok(None)
        } else {
            Ok(Some(RawRecord { first_line, lines }))
        }
    }
}

impl<R: BufRead> Iterator for SdfRecords<R> {
    type Item = Result<Molecule, SdfError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.read_raw_record() {
            Ok(Some(raw)) => {
                self.record_number += 1;
                Some(parse_record(&raw, self.record_number))
            }
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(e) => {
                self.finished = true;
                Some(Err(SdfError::Io(e)))
            }
        }
    }
}

const COUNTS_LINE: usize = 3;

fn parse_record(raw: &RawRecord, record: usize) -> Result<Molecule, SdfError> {
    let line_at = |offset: usize, what: &'static str| -> Result<&str, SdfError> {
        raw.lines
            .get(offset)
            .map(String::as_str)
            .ok_or(SdfError::Parse {
                line: raw.first_line + raw.lines.len(),
                kind: SdfParseErrorKind::Truncated(what),
            })
    };

    let name = line_at(0, "header block")?.trim();
    let counts = line_at(COUNTS_LINE, "counts line")?;
    let counts_line_number = raw.first_line + COUNTS_LINE;

    if counts.get(33..39).map(str::trim) == Some("V3000") {
        return Err(SdfError::Unsupported {
            record,
            format: "V3000 connection table".to_string(),
        });
    }
    let n_atoms: usize = parse_field(counts, 0..3, "atom count", counts_line_number)?;
    let n_bonds: usize = parse_field(counts, 3..6, "bond count", counts_line_number)?;

    let mut molecule = Molecule::new(name);
    let atom_block = COUNTS_LINE + 1;
    for offset in atom_block..atom_block + n_atoms {
        let line = line_at(offset, "atom block")?;
        molecule.add_atom(parse_atom_line(line, raw.first_line + offset)?);
    }

    let bond_block = atom_block + n_atoms;
    for offset in bond_block..bond_block + n_bonds {
        let line = line_at(offset, "bond block")?;
        let line_number = raw.first_line + offset;
        let (atom1, atom2, order) = parse_bond_line(line, line_number)?;
        molecule
            .add_bond(atom1, atom2, order)
            .map_err(|e| SdfError::Parse {
                line: line_number,
                kind: e.into(),
            })?;
    }

    let trailer = raw.lines.get(bond_block + n_bonds..).unwrap_or_default();
    let data_start = apply_property_block(&mut molecule, trailer);
    read_data_items(&mut molecule, &trailer[data_start..]);

    Ok(molecule)
}

fn parse_field<T: FromStr>(
    line: &str,
    columns: Range<usize>,
    field: &'static str,
    line_number: usize,
) -> Result<T, SdfError> {
    let value = line.get(columns).map(str::trim).unwrap_or("");
    value.parse().map_err(|_| SdfError::Parse {
        line: line_number,
        kind: SdfParseErrorKind::InvalidNumber {
            field,
            value: value.to_string(),
        },
    })
}

fn parse_atom_line(line: &str, line_number: usize) -> Result<Atom, SdfError> {
    let x: f64 = parse_field(line, 0..10, "x coordinate", line_number)?;
    let y: f64 = parse_field(line, 10..20, "y coordinate", line_number)?;
    let z: f64 = parse_field(line, 20..30, "z coordinate", line_number)?;

    let symbol = line.get(31..34).map(str::trim).unwrap_or("");
    if symbol.is_empty() {
        return Err(SdfError::Parse {
            line: line_number,
            kind: SdfParseErrorKind::MissingSymbol,
        });
    }

    // Legacy charge code: 1=+3, 2=+2, 3=+1, 5=-1, 6=-2, 7=-3. Superseded by `M  CHG`.
    let charge_code: u8 = line
        .get(36..39)
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(0);
    let formal_charge = match charge_code {
        1..=3 | 5..=7 => 4 - charge_code as i8,
        _ => 0,
    };

    Ok(Atom::new(symbol, Point3::new(x, y, z)).with_charge(formal_charge))
}

fn parse_bond_line(line: &str, line_number: usize) -> Result<(usize, usize, BondOrder), SdfError> {
    let atom1: usize = parse_field(line, 0..3, "first bond atom", line_number)?;
    let atom2: usize = parse_field(line, 3..6, "second bond atom", line_number)?;
    let bond_type: u8 = parse_field(line, 6..9, "bond type", line_number)?;

    let to_index = |serial: usize, field: &'static str| {
        serial.checked_sub(1).ok_or(SdfError::Parse {
            line: line_number,
            kind: SdfParseErrorKind::InvalidNumber {
                field,
                value: serial.to_string(),
            },
        })
    };
    let order = BondOrder::from_mdl_code(bond_type).map_err(|e| SdfError::Parse {
        line: line_number,
        kind: SdfParseErrorKind::InvalidBondType(e.0),
    })?;

    Ok((
        to_index(atom1, "first bond atom")?,
        to_index(atom2, "second bond atom")?,
        order,
    ))
}

/// Applies `M  CHG` lines and returns the offset just past `M  END`.
fn apply_property_block(molecule: &mut Molecule, lines: &[String]) -> usize {
    let mut charges: Vec<(usize, i8)> = Vec::new();
    let mut saw_charge_line = false;
    let mut end = lines.len();

    for (offset, line) in lines.iter().enumerate() {
        if line.starts_with("M  END") {
            end = offset + 1;
            break;
        }
        if line.starts_with("M  CHG") {
            saw_charge_line = true;
            let values: Vec<&str> = line.split_whitespace().skip(3).collect();
            for pair in values.chunks_exact(2) {
                if let (Ok(serial), Ok(charge)) = (pair[0].parse::<usize>(), pair[1].parse::<i8>())
                {
                    if let Some(index) = serial.checked_sub(1) {
                        charges.push((index, charge));
                    }
                }
            }
        }
    }

    if saw_charge_line {
        let atoms = molecule.atoms_mut();
        for atom in atoms.iter_mut() {
            atom.formal_charge = 0;
        }
        for (index, charge) in charges {
            if let Some(atom) = atoms.get_mut(index) {
                atom.formal_charge = charge;
            }
        }
    }
    end
}

fn read_data_items(molecule: &mut Molecule, lines: &[String]) {
    let mut iter = lines.iter();
    while let Some(line) = iter.next() {
        if !line.starts_with('>') {
            continue;
        }
        let name = line
            .split_once('<')
            .and_then(|(_, rest)| rest.split_once('>'))
            .map(|(name, _)| name.trim());

        let mut values = Vec::new();
        for value_line in iter.by_ref() {
            if value_line.trim().is_empty() {
                break;
            }
            values.push(value_line.as_str());
        }
        if let Some(name) = name {
            molecule.set_property(name, &values.join("\n"));
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    /// Builds one V2000 record (including the `$$$$` terminator).
    pub(crate) fn mol_block(
        name: &str,
        atoms: &[(&str, f64, f64, f64)],
        bonds: &[(usize, usize, u8)],
    ) -> String {
        let mut block = format!("{}\n  fixtures\n\n", name);
        block.push_str(&format!(
            "{:>3}{:>3}{}999 V2000\n",
            atoms.len(),
            bonds.len(),
            "  0".repeat(8)
        ));
        for (symbol, x, y, z) in atoms {
            block.push_str(&format!(
                "{:>10.4}{:>10.4}{:>10.4} {:<3} 0  0  0  0  0  0  0  0  0  0  0  0\n",
                x, y, z, symbol
            ));
        }
        for (a, b, t) in bonds {
            block.push_str(&format!("{:>3}{:>3}{:>3}  0\n", a, b, t));
        }
        block.push_str("M  END\n$$$$\n");
        block
    }

    pub(crate) fn ethanol() -> String {
        mol_block(
            "ethanol",
            &[
                ("C", 0.0, 0.0, 0.0),
                ("C", 1.52, 0.0, 0.0),
                ("O", 2.0, 1.3, 0.0),
                ("H", 2.9, 1.3, 0.0),
            ],
            &[(1, 2, 1), (2, 3, 1), (3, 4, 1)],
        )
    }

    pub(crate) fn benzene() -> String {
        let ring: Vec<(&str, f64, f64, f64)> = (0..6)
            .map(|i| {
                let angle = i as f64 * std::f64::consts::PI / 3.0;
                ("C", 1.39 * angle.cos(), 1.39 * angle.sin(), 0.0)
            })
            .collect();
        let bonds: Vec<(usize, usize, u8)> = (1..=6).map(|i| (i, i % 6 + 1, 4)).collect();
        mol_block("benzene", &ring, &bonds)
    }

    /// A record whose first atom has an unparsable x coordinate.
    pub(crate) fn broken() -> String {
        ethanol()
            .replacen("ethanol", "broken", 1)
            .replacen("    0.0000    0.0000", "    abcdef    0.0000", 1)
    }
}

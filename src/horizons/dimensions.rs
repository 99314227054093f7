use std::fmt;

/// Physical quantity carried by a Horizons table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    /// Julian date epoch (always days)
    JD,
    /// Elapsed time, e.g. light time
    Time,
    /// Distance
    Space,
    Velocity,
    Angle,
    AngularVelocity,
}

impl Dimension {
    pub const ALL: [Dimension; 6] = [
        Dimension::JD,
        Dimension::Time,
        Dimension::Space,
        Dimension::Velocity,
        Dimension::Angle,
        Dimension::AngularVelocity,
    ];

    /// Column labels of vector and element tables holding this dimension.
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            Dimension::JD => &["JDTDB", "Tp"],
            Dimension::Time => &["LT"],
            Dimension::Space => &["X", "Y", "Z", "RG", "QR", "A", "AD"],
            Dimension::Velocity => &["VX", "VY", "VZ", "RR"],
            Dimension::Angle => &["IN", "OM", "W", "MA", "TA"],
            Dimension::AngularVelocity => &["N"],
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Dimension::JD => "JD",
            Dimension::Time => "TIME",
            Dimension::Space => "SPACE",
            Dimension::Velocity => "VELOCITY",
            Dimension::Angle => "ANGLE",
            Dimension::AngularVelocity => "ANGULAR_VELOCITY",
        };
        f.write_str(name)
    }
}

/// Physical dimension of a column, matched exactly (case-sensitive) against [`Dimension::columns`].
///
/// Labels, flags and free-text columns have no dimension.
pub fn column_dimension(column: &str) -> Option<Dimension> {
    Dimension::ALL
        .into_iter()
        .find(|dim| dim.columns().contains(&column))
}

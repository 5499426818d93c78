//! ASME B36.10M (carbon steel) and B36.19M (stainless, `s` schedules) pipe
//! dimensions. Values in millimetres.

use crate::error::{EquipmentError, EquipmentResult};
use hn_core::units::{Length, mm};

/// Tolerance for an exact inner-diameter match [mm].
pub const MATCH_TOLERANCE_MM: f64 = 0.001;

/// One nominal pipe size with its wall thickness per schedule.
#[derive(Debug, Clone, Copy)]
pub struct PipeSize {
    /// Metric nominal diameter (DN)
    pub dn: u32,
    /// Nominal pipe size in inches, as printed on the standard
    pub nps: &'static str,
    /// Outside diameter [mm]
    pub od_mm: f64,
    /// `(schedule, wall thickness [mm])`
    pub schedules: &'static [(&'static str, f64)],
}

impl PipeSize {
    pub fn wall_thickness(&self, schedule: &str) -> Option<f64> {
        self.schedules
            .iter()
            .find(|(s, _)| s.eq_ignore_ascii_case(schedule.trim()))
            .map(|&(_, wt)| wt)
    }

    /// Inner diameter for a schedule.
    pub fn inner_diameter(&self, schedule: &str) -> Option<Length> {
        self.wall_thickness(schedule)
            .map(|wt| mm(self.od_mm - 2.0 * wt))
    }
}

const SMALL_BORE_SCHEDULES: [&str; 8] = ["5s", "10s", "40s", "40", "STD", "80s", "80", "XS"];

macro_rules! small_bore {
    ($dn:expr, $nps:expr, $od:expr, [$s5:expr, $s10:expr, $s40:expr, $s80:expr]) => {
        PipeSize {
            dn: $dn,
            nps: $nps,
            od_mm: $od,
            schedules: &[
                (SMALL_BORE_SCHEDULES[0], $s5),
                (SMALL_BORE_SCHEDULES[1], $s10),
                (SMALL_BORE_SCHEDULES[2], $s40),
                (SMALL_BORE_SCHEDULES[3], $s40),
                (SMALL_BORE_SCHEDULES[4], $s40),
                (SMALL_BORE_SCHEDULES[5], $s80),
                (SMALL_BORE_SCHEDULES[6], $s80),
                (SMALL_BORE_SCHEDULES[7], $s80),
            ],
        }
    };
}

pub static ASME_PIPE_SIZES: &[PipeSize] = &[
    small_bore!(15, "1/2", 21.3, [1.65, 2.11, 2.77, 3.73]),
    small_bore!(20, "3/4", 26.7, [1.65, 2.11, 2.87, 3.91]),
    small_bore!(25, "1", 33.4, [1.65, 2.77, 3.38, 4.55]),
    small_bore!(32, "1 1/4", 42.2, [1.65, 2.77, 3.56, 4.85]),
    small_bore!(40, "1 1/2", 48.3, [1.65, 2.77, 3.68, 5.08]),
    small_bore!(50, "2", 60.3, [1.65, 2.77, 3.91, 5.54]),
    small_bore!(65, "2 1/2", 73.0, [2.11, 3.05, 5.16, 7.01]),
    small_bore!(80, "3", 88.9, [2.11, 3.05, 5.49, 7.62]),
    small_bore!(100, "4", 114.3, [2.11, 3.05, 6.02, 8.56]),
    small_bore!(125, "5", 141.3, [2.77, 3.40, 6.55, 9.53]),
    small_bore!(150, "6", 168.3, [2.77, 3.40, 7.11, 10.97]),
    PipeSize {
        dn: 200,
        nps: "8",
        od_mm: 219.1,
        schedules: &[
            ("5s", 2.77),
            ("10s", 3.76),
            ("20", 6.35),
            ("30", 7.04),
            ("40s", 8.18),
            ("40", 8.18),
            ("STD", 8.18),
            ("60", 10.31),
            ("80s", 12.70),
            ("80", 12.70),
            ("XS", 12.70),
        ],
    },
    PipeSize {
        dn: 250,
        nps: "10",
        od_mm: 273.0,
        schedules: &[
            ("5s", 3.40),
            ("10s", 4.19),
            ("20", 6.35),
            ("30", 7.80),
            ("40s", 9.27),
            ("40", 9.27),
            ("STD", 9.27),
            ("60", 12.70),
            ("80s", 12.70),
            ("80", 15.09),
            ("XS", 12.70),
        ],
    },
    PipeSize {
        dn: 300,
        nps: "12",
        od_mm: 323.8,
        schedules: &[
            ("5s", 3.96),
            ("10s", 4.57),
            ("20", 6.35),
            ("30", 8.38),
            ("40s", 9.53),
            ("40", 10.31),
            ("STD", 9.53),
            ("60", 14.27),
            ("80s", 12.70),
            ("80", 17.48),
            ("XS", 12.70),
        ],
    },
    PipeSize {
        dn: 350,
        nps: "14",
        od_mm: 355.6,
        schedules: &[
            ("10", 6.35),
            ("10s", 4.78),
            ("20", 7.92),
            ("30", 9.53),
            ("40", 11.13),
            ("STD", 9.53),
            ("60", 15.09),
            ("80", 19.05),
            ("XS", 12.70),
        ],
    },
    PipeSize {
        dn: 400,
        nps: "16",
        od_mm: 406.4,
        schedules: &[
            ("10", 6.35),
            ("10s", 4.78),
            ("20", 9.53),
            ("30", 12.70),
            ("40", 12.70),
            ("STD", 9.53),
            ("60", 16.66),
            ("80", 21.44),
            ("XS", 12.70),
        ],
    },
];

/// Find a size by DN number (`"100"`) or NPS (`"4"`, `"1 1/2"`).
pub fn find_size(nominal: &str) -> Option<&'static PipeSize> {
    let nominal = nominal.trim();
    ASME_PIPE_SIZES
        .iter()
        .find(|s| s.nps == nominal)
        .or_else(|| {
            let dn: u32 = nominal.trim_start_matches("DN").trim().parse().ok()?;
            ASME_PIPE_SIZES.iter().find(|s| s.dn == dn)
        })
}

/// Inner diameter of a standard pipe.
pub fn inner_diameter(nominal: &str, schedule: &str) -> EquipmentResult<Length> {
    find_size(nominal)
        .ok_or(EquipmentError::NotSupported {
            what: "unknown nominal pipe size",
        })?
        .inner_diameter(schedule)
        .ok_or(EquipmentError::NotSupported {
            what: "schedule not listed for this pipe size",
        })
}

/// Identify the standard size/schedule whose inner diameter equals `id`
/// within [`MATCH_TOLERANCE_MM`].
pub fn match_inner_diameter(id: Length) -> Option<(&'static PipeSize, &'static str)> {
    let id_mm = id.value * 1000.0;
    ASME_PIPE_SIZES.iter().find_map(|size| {
        size.schedules
            .iter()
            .find(|&&(_, wt)| (size.od_mm - 2.0 * wt - id_mm).abs() < MATCH_TOLERANCE_MM)
            .map(|&(sch, _)| (size, sch))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use hn_core::units::m;

    #[test]
    fn four_inch_schedule_40() {
        let id = inner_diameter("4", "40").unwrap();
        assert!((id.value - 0.10226).abs() < 1e-9);
        let same = inner_diameter("100", "STD").unwrap();
        assert!((id.value - same.value).abs() < 1e-12);
    }

    #[test]
    fn lookup_by_dn_prefix_and_case() {
        assert_eq!(find_size("DN 50").unwrap().nps, "2");
        assert!(inner_diameter("2", "xs").is_ok());
    }

    #[test]
    fn unknown_entries() {
        assert!(inner_diameter("3 1/2", "40").is_err());
        assert!(inner_diameter("1/2", "160").is_err());
    }

    #[test]
    fn reverse_match() {
        let (size, sch) = match_inner_diameter(m(0.10226)).unwrap();
        assert_eq!(size.dn, 100);
        assert!(sch == "40s" || sch == "40" || sch == "STD");
        assert!(match_inner_diameter(m(0.1)).is_none());
    }

    #[test]
    fn every_inner_diameter_positive() {
        for size in ASME_PIPE_SIZES {
            for &(sch, _) in size.schedules {
                assert!(size.inner_diameter(sch).unwrap().value > 0.0);
            }
        }
    }
}

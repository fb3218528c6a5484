use dataset_dashboard::data::{DatasetCache, UberFilter};
use dataset_dashboard::pages::{GymPage, PageError, UberPage};
use dataset_dashboard::stats::NO_DATA;
use std::path::PathBuf;

const UBER_CSV: &str = "Date/Time,Lat,Lon,Base\n\
4/7/2014 5:00:00,40.769,-73.9549,B02512\n\
4/7/2014 5:30:00,40.7267,-74.0345,B02512\n\
4/11/2014 17:15:00,40.7316,-73.9873,B02598\n\
4/11/2014 20:45:00,40.7588,-73.9776,B02682\n";

const GYM_CSV: &str = ",Title,Desc,Type,BodyPart,Equipment,Level,Rating,RatingDesc\n\
0,Partner plank band row,,Strength,Abdominals,Bands,Intermediate,0.0,\n\
1,Banded crunch isometric hold,,Strength,Abdominals,Bands,Intermediate,,\n\
2,Rope jumping,,Cardio,Quadriceps,Other,Beginner,,\n\
3,Barbell deadlift,,Powerlifting,Lower Back,Barbell,Expert,9.1,Average\n\
4,Dumbbell bench press,,Strength,Chest,Dumbbell,Beginner,8.5,Average\n";

fn write(dir: &tempfile::TempDir, name: &str, body: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, body).unwrap();
    path
}

#[test]
fn pickups_page_renders_filtered_view() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "uber.csv", UBER_CSV);
    let mut cache = DatasetCache::new();
    let page = UberPage::open(&mut cache, &path).unwrap();

    let all = page.render(&UberFilter::all()).unwrap();
    assert_eq!(all.metrics.total_pickups, 4);
    assert_eq!(all.metrics.peak_hour, Some(5));
    assert_eq!(all.pickups_by_hour[5], 2);
    assert_eq!(all.pickups_by_base.get("B02512"), Some(2));
    assert_eq!(all.pickups_by_base.total(), 4);
    assert_eq!(all.locations.len(), 4);
    assert_eq!(all.preview.rows.len(), 4);

    let evening = UberFilter::new(17, 23, ["Friday"]).unwrap();
    let view = page.render(&evening).unwrap();
    assert_eq!(view.metrics.total_pickups, 2);
    assert_eq!(view.pickups_by_hour[17], 1);
    assert_eq!(view.pickups_by_hour[20], 1);
    assert_eq!(view.pickups_by_day.get("Friday"), Some(2));
    assert_eq!(view.pickups_by_day.get("Monday"), Some(0));
    assert_eq!(view.hourly_series.len(), 4);
    assert_eq!(view.days, vec!["Friday"]);

    // the base table is untouched by filtering
    assert_eq!(page.data().height(), 4);
}

#[test]
fn empty_selection_reports_no_data() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "uber.csv", UBER_CSV);
    let mut cache = DatasetCache::new();
    let page = UberPage::open(&mut cache, &path).unwrap();

    let none = UberFilter::new(0, 23, Vec::<&str>::new()).unwrap();
    let view = page.render(&none).unwrap();
    assert_eq!(view.metrics.total_pickups, 0);
    assert_eq!(view.metrics.peak_hour_label(), NO_DATA);
    assert_eq!(view.metrics.peak_day_label(), NO_DATA);
    assert!(view.hourly_series.is_empty());
    assert!(view.pickups_by_base.is_empty());
}

#[test]
fn pages_share_cached_tables() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "uber.csv", UBER_CSV);
    let mut cache = DatasetCache::new();

    let first = UberPage::open(&mut cache, &path).unwrap();
    std::fs::remove_file(&path).unwrap();
    let second = UberPage::open(&mut cache, &path);

    // served from the cache even though the file is gone
    assert!(second.is_ok());
    assert!(first.data().equals(second.unwrap().data()));
}

#[test]
fn bad_timestamp_is_fatal_to_the_page() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        &dir,
        "uber.csv",
        "Date/Time,Lat,Lon,Base\n4/7/2014 5:00:00,40.769,-73.9549,B02512\nsoon,40.7267,-74.0345,B02512\n",
    );
    let mut cache = DatasetCache::new();

    let err = UberPage::open(&mut cache, &path).err().unwrap();
    assert!(matches!(err, PageError::Derive(_)));
    assert!(cache.is_empty());
}

const BASES: [&str; 5] = ["B02512", "B02598", "B02617", "B02682", "B02764"];

fn month_of_pickups(rows: usize) -> String {
    let mut csv = String::from("Date/Time,Lat,Lon,Base\n");
    for i in 0..rows {
        let day = 1 + i % 30;
        let hour = (i / 7) % 24;
        let minute = i % 60;
        let lat = 40.6 + (i % 1000) as f64 / 10_000.0;
        let lon = -74.0 + (i % 500) as f64 / 10_000.0;
        csv.push_str(&format!(
            "4/{day}/2014 {hour}:{minute:02}:00,{lat:.4},{lon:.4},{}\n",
            BASES[i % BASES.len()]
        ));
    }
    csv
}

#[test]
fn full_month_renders_across_chunks() {
    let rows = 300_000;
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "uber-raw-data-apr14.csv", &month_of_pickups(rows));
    let mut cache = DatasetCache::new();
    let page = UberPage::open(&mut cache, &path).unwrap();
    assert_eq!(page.data().height(), rows);

    let view = page.render(&UberFilter::all()).unwrap();
    assert_eq!(view.metrics.total_pickups, rows);
    assert!(view.metrics.peak_hour.is_some());
    assert!(view.metrics.peak_day.is_some());
    assert_eq!(view.pickups_by_hour.iter().sum::<usize>(), rows);
    assert_eq!(view.pickups_by_base.len(), BASES.len());
    for base in BASES {
        assert_eq!(view.pickups_by_base.get(base), Some(rows / BASES.len()));
    }
    assert_eq!(view.pickups_by_day.total(), rows);
    assert_eq!(view.hourly_series.iter().map(|b| b.pickups).sum::<usize>(), rows);
    assert!(view.hourly_series.len() <= 30 * 24);
    assert_eq!(view.locations.len(), rows);

    let weekend = UberFilter::new(8, 11, ["Saturday", "Sunday"]).unwrap();
    let view = page.render(&weekend).unwrap();
    assert!(view.metrics.total_pickups > 0);
    assert_eq!(view.pickups_by_base.total(), view.metrics.total_pickups);
    assert!(view.pickups_by_hour[..8].iter().all(|&n| n == 0));
    assert!(view.pickups_by_hour[12..].iter().all(|&n| n == 0));
}

#[test]
fn unparsable_rows_fail_the_load() {
    let cases = [
        "Date/Time,Lat,Lon,Base\n4/7/2014 5:00:00,40.769,-73.9549,B02512\n4/7/2014 5:30:00,north,-74.0345,B02512\n",
        "Date/Time,Lat,Lon,Base\n4/7/2014 5:00:00,40.769,-73.9549,B02512\n4/7/2014 6:00:00,40.7\n",
        "Date/Time,Lat,Lon,Base\n4/7/2014 5:00:00,40.769,-73.9549,B02512\n4/7/2014 7:00:00,40.7,-74.0,B02512,extra\n",
    ];

    for body in cases {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "uber.csv", body);
        let mut cache = DatasetCache::new();

        let err = UberPage::open(&mut cache, &path).err().unwrap();
        assert!(matches!(err, PageError::Load(_)), "{body:?} gave {err}");
        assert!(cache.is_empty());
    }
}

#[test]
fn gym_page_groups_by_type() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "gym.csv", GYM_CSV);
    let mut cache = DatasetCache::new();
    let view = GymPage::open(&mut cache, &path).unwrap().render().unwrap();

    assert_eq!(
        view.body_parts,
        vec!["Abdominals", "Quadriceps", "Lower Back", "Chest"]
    );
    assert_eq!(view.type_counts.get("Strength"), Some(3));
    assert_eq!(view.body_part_counts.entries()[0].value, "Abdominals");
    assert_eq!(view.level_counts.total(), 5);
    assert_eq!(view.equipment_counts.get("Bands"), Some(2));

    let strength = &view.body_parts_by_type[0];
    assert_eq!(strength.primary, "Strength");
    assert_eq!(strength.counts.get("Abdominals"), Some(2));
    assert_eq!(strength.counts.get("Chest"), Some(1));

    let types: Vec<&str> = view.levels_by_type.iter().map(|t| t.primary.as_str()).collect();
    assert_eq!(types, vec!["Strength", "Cardio", "Powerlifting"]);
    assert_eq!(view.levels_by_type[2].counts.get("Expert"), Some(1));
}

#[test]
fn gym_page_requires_schema() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "gym.csv", "Title,Type\nPlank,Strength\n");
    let mut cache = DatasetCache::new();

    assert!(matches!(
        GymPage::open(&mut cache, &path),
        Err(PageError::Load(_))
    ));
}

use approx::assert_abs_diff_eq;
use ndarray::Array3;
use netcdf::{create, open, AttributeValue};
use ru_ne_stat::{
    errors::{Result, RuNeStatError},
    statistics::{
        mean_over_dimension, median_over_dimension, percentile_over_dimension,
        summarize_variable, variance_over_dimension,
    },
    NetCDFWriter, StatOperation,
};
use std::path::Path;
use tempfile::tempdir;

/// Writes a 4x3x2 `temperature(time, lat, lon)` variable holding 1..=24.
fn create_test_file(path: &Path) -> Result<()> {
    let test_data: Vec<f32> = (1..=24).map(|i| i as f32).collect();

    let mut file = create(path)?;
    file.add_dimension("time", 4)?;
    file.add_dimension("lat", 3)?;
    file.add_dimension("lon", 2)?;

    let mut var = file.add_variable::<f32>("temperature", &["time", "lat", "lon"])?;
    var.put_attribute("units", "degrees_C")?;
    var.put_attribute("_FillValue", -999.0f32)?;

    let data_array = Array3::from_shape_vec((4, 3, 2), test_data)?;
    var.put(data_array.view(), ..)?;

    file.add_attribute("title", "Test Dataset")?;
    Ok(())
}

#[test]
fn test_reductions_over_named_dimensions() -> Result<()> {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let file_path = temp_dir.path().join("test_stats.nc");
    create_test_file(&file_path)?;
    let file = open(&file_path)?;

    // Along time each (lat, lon) cell sees x, x+6, x+12, x+18
    let mean = mean_over_dimension(&file, "temperature", "time")?;
    assert_eq!(mean.output_variable_name(), "temperature_mean_over_time");
    assert_eq!(mean.remaining_dimensions, vec!["lat", "lon"]);
    assert_eq!(mean.shape(), &[3, 2]);
    assert_eq!(mean.data[[0, 0]], 10.0);
    assert_eq!(mean.data[[2, 1]], 15.0);

    let median = median_over_dimension(&file, "temperature", "time")?;
    assert_eq!(median.data, mean.data);

    let variance = variance_over_dimension(&file, "temperature", "time")?;
    assert_eq!(variance.operation, StatOperation::Variance);
    for &v in variance.data.iter() {
        assert_abs_diff_eq!(v, 45.0, epsilon = 1e-12);
    }

    // Along lon each pair is (x, x+1)
    let p25 = percentile_over_dimension(&file, "temperature", "lon", 25.0)?;
    assert_eq!(p25.output_variable_name(), "temperature_p25_over_lon");
    assert_eq!(p25.remaining_dimensions, vec!["time", "lat"]);
    assert_eq!(p25.shape(), &[4, 3]);
    assert_eq!(p25.data[[0, 0]], 1.25);
    assert_eq!(p25.data[[3, 2]], 23.25);

    Ok(())
}

#[test]
fn test_lookup_and_argument_errors() -> Result<()> {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let file_path = temp_dir.path().join("test_errors.nc");
    create_test_file(&file_path)?;
    let file = open(&file_path)?;

    match mean_over_dimension(&file, "temperature", "depth") {
        Err(RuNeStatError::DimensionNotFound { var, dim }) => {
            assert_eq!(var, "temperature");
            assert_eq!(dim, "depth");
        }
        other => panic!("Expected DimensionNotFound error, got {:?}", other),
    }

    assert!(matches!(
        median_over_dimension(&file, "salinity", "time"),
        Err(RuNeStatError::VariableNotFound { .. })
    ));

    assert!(matches!(
        percentile_over_dimension(&file, "temperature", "time", 150.0),
        Err(RuNeStatError::InvalidArgument { .. })
    ));

    Ok(())
}

#[test]
fn test_variable_summary() -> Result<()> {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let file_path = temp_dir.path().join("test_summary.nc");
    create_test_file(&file_path)?;
    let file = open(&file_path)?;

    let summary = summarize_variable(&file, "temperature")?;
    assert_eq!(summary.count, 24);
    assert_eq!(summary.min, 1.0);
    assert_eq!(summary.max, 24.0);
    assert_eq!(summary.mean, 12.5);
    assert_eq!(summary.median, 12.5);
    // (n^2 - 1) / 12 for 1..=n
    assert_abs_diff_eq!(summary.variance, 575.0 / 12.0, epsilon = 1e-12);
    assert_abs_diff_eq!(summary.std_dev, (575.0f64 / 12.0).sqrt(), epsilon = 1e-12);

    Ok(())
}

#[test]
fn test_write_result_round_trip() -> Result<()> {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let input_path = temp_dir.path().join("input.nc");
    let output_path = temp_dir.path().join("output.nc");
    create_test_file(&input_path)?;
    let input = open(&input_path)?;

    let result = median_over_dimension(&input, "temperature", "lat")?;
    NetCDFWriter::new(&input, &output_path).write_result(&result)?;

    // Writing again replaces the file instead of failing
    NetCDFWriter::new(&input, &output_path).write_result(&result)?;

    let output = open(&output_path)?;
    let var = output
        .variable("temperature_median_over_lat")
        .expect("result variable should exist");

    let dims: Vec<String> = var.dimensions().iter().map(|d| d.name().to_string()).collect();
    assert_eq!(dims, vec!["time", "lon"]);

    let values: Vec<f64> = var.get_values::<f64, _>(..)?;
    assert_eq!(values, result.data.iter().copied().collect::<Vec<_>>());
    assert_eq!(values[0], 3.0);

    match var.attribute("units").map(|a| a.value()).transpose()? {
        Some(AttributeValue::Str(units)) => assert_eq!(units, "degrees_C"),
        other => panic!("Expected units attribute, got {:?}", other),
    }
    match var.attribute("statistic").map(|a| a.value()).transpose()? {
        Some(AttributeValue::Str(label)) => assert_eq!(label, "median"),
        other => panic!("Expected statistic attribute, got {:?}", other),
    }
    match var.attribute("_FillValue").map(|a| a.value()).transpose()? {
        Some(AttributeValue::Double(fill)) => assert_eq!(fill, -999.0),
        other => panic!("Expected _FillValue attribute, got {:?}", other),
    }
    assert!(output.attribute("history").is_some());

    Ok(())
}

#[test]
fn test_fill_values_are_masked_as_nan() -> Result<()> {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let file_path = temp_dir.path().join("test_fill.nc");

    {
        let mut file = create(&file_path)?;
        file.add_dimension("time", 3)?;
        file.add_dimension("station", 2)?;

        let mut var = file.add_variable::<f32>("rainfall", &["time", "station"])?;
        var.put_attribute("_FillValue", -999.0f32)?;

        // Station 0 is missing its second reading
        let data = ndarray::Array2::from_shape_vec(
            (3, 2),
            vec![2.0f32, 10.0, -999.0, 20.0, 4.0, 30.0],
        )?;
        var.put(data.view(), ..)?;
    }

    let file = open(&file_path)?;

    let mean = mean_over_dimension(&file, "rainfall", "time")?;
    assert!(mean.data[[0]].is_nan());
    assert_eq!(mean.data[[1]], 20.0);

    let median = median_over_dimension(&file, "rainfall", "time")?;
    assert!(median.data[[0]].is_nan());
    assert_eq!(median.data[[1]], 20.0);

    // The sentinel never reaches min, max or the moments
    let summary = summarize_variable(&file, "rainfall")?;
    assert_eq!(summary.count, 6);
    assert_eq!(summary.min, 2.0);
    assert_eq!(summary.max, 30.0);
    assert!(summary.mean.is_nan());

    Ok(())
}

#[test]
fn test_write_result_refuses_to_overwrite_input() -> Result<()> {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let input_path = temp_dir.path().join("input.nc");
    create_test_file(&input_path)?;
    let input = open(&input_path)?;

    let result = mean_over_dimension(&input, "temperature", "time")?;
    match NetCDFWriter::new(&input, &input_path).write_result(&result) {
        Err(RuNeStatError::InvalidArgument { message }) => {
            assert!(message.contains("is the input file"));
        }
        other => panic!("Expected InvalidArgument, got {:?}", other),
    }

    // The source is untouched and still readable
    assert!(input_path.exists());
    let reopened = open(&input_path)?;
    let again = mean_over_dimension(&reopened, "temperature", "time")?;
    assert_eq!(again.data, result.data);

    Ok(())
}

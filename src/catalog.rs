//! Built-in example procedures.
//!
//! Each entry is a self-contained pseudocode snippet whose first procedure
//! is the intended analysis target; helper procedures follow it. The CLI
//! exposes these through `--example` and `--list-examples`, and the
//! integration tests run the full analysis over every entry.

#[derive(Debug, Clone, Copy)]
pub struct Example {
    pub name: &'static str,
    pub description: &'static str,
    pub source: &'static str,
}

pub fn find(name: &str) -> Option<&'static Example> {
    EXAMPLES.iter().find(|e| e.name.eq_ignore_ascii_case(name))
}

pub const EXAMPLES: &[Example] = &[
    Example {
        name: "insertion-sort",
        description: "Insertion sort: Θ(n^2) average, Ω(n) on sorted input",
        source: r#"PROCEDURE InsertionSort(A, n)
BEGIN
    FOR j <- 2 TO n DO
        key <- A[j]
        i <- j - 1
        WHILE i > 0 AND A[i] > key DO
            A[i + 1] <- A[i]
            i <- i - 1
        END
        A[i + 1] <- key
    END
END
"#,
    },
    Example {
        name: "selection-sort",
        description: "Selection sort: Θ(n^2) in every case",
        source: r#"PROCEDURE SelectionSort(A, n)
BEGIN
    FOR i <- 1 TO n - 1 DO
        minIndex <- i
        FOR j <- i + 1 TO n DO
            IF A[j] < A[minIndex] THEN
                minIndex <- j
            ENDIF
        END
        CALL swap(A, i, minIndex)
    END
END
"#,
    },
    Example {
        name: "bubble-sort",
        description: "Bubble sort: Θ(n^2) in every case",
        source: r#"PROCEDURE BubbleSort(A, n)
BEGIN
    FOR i <- 1 TO n - 1 DO
        FOR j <- 1 TO n - i DO
            IF A[j] > A[j + 1] THEN
                CALL swap(A, j, j + 1)
            ENDIF
        END
    END
END
"#,
    },
    Example {
        name: "merge-sort",
        description: "Merge sort: T(n) = 2T(n/2) + O(n), Θ(n log n)",
        source: r#"PROCEDURE MergeSort(A, lo, hi)
BEGIN
    IF lo < hi THEN
        mid <- (lo + hi) / 2
        CALL MergeSort(A, lo, mid)
        CALL MergeSort(A, mid + 1, hi)
        CALL Merge(A, lo, mid, hi)
    ENDIF
END

PROCEDURE Merge(A, lo, mid, hi)
BEGIN
    i <- lo
    j <- mid + 1
    k <- lo
    WHILE i <= mid AND j <= hi DO
        IF A[i] <= A[j] THEN
            B[k] <- A[i]
            i <- i + 1
        ELSE
            B[k] <- A[j]
            j <- j + 1
        ENDIF
        k <- k + 1
    END
    WHILE i <= mid DO
        B[k] <- A[i]
        i <- i + 1
        k <- k + 1
    END
    WHILE j <= hi DO
        B[k] <- A[j]
        j <- j + 1
        k <- k + 1
    END
    FOR t <- lo TO hi DO
        A[t] <- B[t]
    END
END
"#,
    },
    Example {
        name: "quick-sort",
        description: "Quicksort: O(n^2) worst, Θ(n log n) average",
        source: r#"PROCEDURE QuickSort(A, p, r)
BEGIN
    IF p < r THEN
        q <- Partition(A, p, r)
        CALL QuickSort(A, p, q - 1)
        CALL QuickSort(A, q + 1, r)
    ENDIF
END

PROCEDURE Partition(A, p, r)
BEGIN
    pivot <- A[r]
    i <- p - 1
    FOR j <- p TO r - 1 DO
        IF A[j] <= pivot THEN
            i <- i + 1
            CALL swap(A, i, j)
        ENDIF
    END
    CALL swap(A, i + 1, r)
    RETURN i + 1
END
"#,
    },
    Example {
        name: "heap-sort",
        description: "Heapsort with an iterative sift-down: Θ(n log n)",
        source: r#"PROCEDURE HeapSort(A, n)
BEGIN
    CALL BuildMaxHeap(A, n)
    FOR i <- n TO 2 STEP -1 DO
        CALL swap(A, 1, i)
        CALL MaxHeapify(A, 1, i - 1)
    END
END

PROCEDURE BuildMaxHeap(A, n)
BEGIN
    FOR i <- n / 2 TO 1 STEP -1 DO
        CALL MaxHeapify(A, i, n)
    END
END

PROCEDURE MaxHeapify(A, i, n)
BEGIN
    WHILE i <= n DO
        largest <- i
        l <- 2 * i
        r <- 2 * i + 1
        IF l <= n AND A[l] > A[largest] THEN
            largest <- l
        ENDIF
        IF r <= n AND A[r] > A[largest] THEN
            largest <- r
        ENDIF
        IF largest = i THEN
            RETURN
        ENDIF
        CALL swap(A, i, largest)
        i <- largest
    END
END
"#,
    },
    Example {
        name: "linear-search",
        description: "Linear search: Ω(1), O(n), Θ(n) on average",
        source: r#"PROCEDURE LinearSearch(A, n, x)
BEGIN
    FOR i <- 1 TO n DO
        IF A[i] = x THEN
            RETURN i
        ENDIF
    END
    RETURN 0
END
"#,
    },
    Example {
        name: "binary-search",
        description: "Iterative binary search: Θ(log n)",
        source: r#"PROCEDURE BinarySearch(A, n, x)
BEGIN
    lo <- 1
    hi <- n
    WHILE lo <= hi DO
        mid <- (lo + hi) / 2
        IF A[mid] = x THEN
            RETURN mid
        ENDIF
        IF A[mid] < x THEN
            lo <- mid + 1
        ELSE
            hi <- mid - 1
        ENDIF
    END
    RETURN 0
END
"#,
    },
    Example {
        name: "binary-search-rec",
        description: "Recursive binary search: T(n) = T(n/2) + O(1), Θ(log n)",
        source: r#"PROCEDURE BinarySearchRec(A, lo, hi, x)
BEGIN
    IF lo > hi THEN
        RETURN 0
    ENDIF
    mid <- (lo + hi) / 2
    IF A[mid] = x THEN
        RETURN mid
    ENDIF
    IF A[mid] < x THEN
        RETURN BinarySearchRec(A, mid + 1, hi, x)
    ELSE
        RETURN BinarySearchRec(A, lo, mid - 1, x)
    ENDIF
END
"#,
    },
    Example {
        name: "factorial",
        description: "Iterative factorial: Θ(n)",
        source: r#"PROCEDURE Factorial(n)
BEGIN
    result <- 1
    FOR i <- 2 TO n DO
        result <- result * i
    END
    RETURN result
END
"#,
    },
    Example {
        name: "factorial-rec",
        description: "Recursive factorial: T(n) = T(n-1) + O(1), Θ(n)",
        source: r#"PROCEDURE FactorialRec(n)
BEGIN
    IF n <= 1 THEN
        RETURN 1
    ENDIF
    RETURN n * FactorialRec(n - 1)
END
"#,
    },
    Example {
        name: "fibonacci",
        description: "Naive Fibonacci: T(n) = T(n-1) + T(n-2) + O(1), Θ(φ^n)",
        source: r#"PROCEDURE Fibonacci(n)
BEGIN
    IF n <= 1 THEN
        RETURN n
    ENDIF
    RETURN Fibonacci(n - 1) + Fibonacci(n - 2)
END
"#,
    },
    Example {
        name: "fast-power",
        description: "Exponentiation by squaring: T(n) = T(n/2) + O(1), Θ(log n)",
        source: r#"PROCEDURE Power(x, n)
BEGIN
    IF n = 0 THEN
        RETURN 1
    ENDIF
    half <- Power(x, n / 2)
    IF n mod 2 = 0 THEN
        RETURN half * half
    ENDIF
    RETURN x * half * half
END
"#,
    },
    Example {
        name: "array-sum",
        description: "Summing an array: Θ(n)",
        source: r#"PROCEDURE ArraySum(A, n)
BEGIN
    total <- 0
    FOR i <- 1 TO n DO
        total <- total + A[i]
    END
    RETURN total
END
"#,
    },
    Example {
        name: "matrix-multiply",
        description: "Classic matrix multiplication: Θ(n^3)",
        source: r#"PROCEDURE MatrixMultiply(A, B, C, n)
BEGIN
    FOR i <- 1 TO n DO
        FOR j <- 1 TO n DO
            C[i][j] <- 0
            FOR k <- 1 TO n DO
                C[i][j] <- C[i][j] + A[i][k] * B[k][j]
            END
        END
    END
END
"#,
    },
    Example {
        name: "gcd",
        description: "Euclid's algorithm: Θ(log n)",
        source: r#"PROCEDURE Gcd(a, b)
BEGIN
    IF b = 0 THEN
        RETURN a
    ENDIF
    RETURN Gcd(b, a mod b)
END
"#,
    },
    Example {
        name: "is-prime",
        description: "Trial division up to sqrt(n): O(sqrt(n))",
        source: r#"PROCEDURE IsPrime(n)
BEGIN
    IF n < 2 THEN
        RETURN 0
    ENDIF
    FOR i <- 2 TO floor(sqrt(n)) DO
        IF n mod i = 0 THEN
            RETURN 0
        ENDIF
    END
    RETURN 1
END
"#,
    },
    Example {
        name: "hanoi",
        description: "Towers of Hanoi: T(n) = 2T(n-1) + O(1), Θ(2^n)",
        source: r#"PROCEDURE Hanoi(n, source, target, spare)
BEGIN
    IF n = 0 THEN
        RETURN
    ENDIF
    CALL Hanoi(n - 1, source, spare, target)
    CALL print(source, target)
    CALL Hanoi(n - 1, spare, target, source)
END
"#,
    },
];
